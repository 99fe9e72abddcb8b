// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Client for the remote deck/card store.

use std::future::Future;

use flashdeck_core::Card;
use flashdeck_core::CardFields;
use flashdeck_core::CardId;
use flashdeck_core::Deck;
use flashdeck_core::DeckFields;
use flashdeck_core::DeckId;
use flashdeck_core::ErrorReport;
use flashdeck_core::FetchError;
use flashdeck_core::FetchResult;
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::select;
use tokio_util::sync::CancellationToken;

/// The backend's deck and card resources. Every call takes a cancellation
/// token; a cancelled call resolves to [`FetchError::Cancelled`] and never
/// with data.
pub trait DeckApi: Send + Sync {
    /// All decks, with their cards embedded.
    fn list_decks(
        &self,
        token: &CancellationToken,
    ) -> impl Future<Output = FetchResult<Vec<Deck>>> + Send;

    fn read_deck(
        &self,
        id: DeckId,
        token: &CancellationToken,
    ) -> impl Future<Output = FetchResult<Deck>> + Send;

    fn read_card(
        &self,
        id: CardId,
        token: &CancellationToken,
    ) -> impl Future<Output = FetchResult<Card>> + Send;

    fn create_deck(
        &self,
        fields: &DeckFields,
        token: &CancellationToken,
    ) -> impl Future<Output = FetchResult<Deck>> + Send;

    fn create_card(
        &self,
        deck_id: DeckId,
        fields: &CardFields,
        token: &CancellationToken,
    ) -> impl Future<Output = FetchResult<Card>> + Send;

    /// Replace a deck's own fields. Its cards are not sent.
    fn update_deck(
        &self,
        deck: &Deck,
        token: &CancellationToken,
    ) -> impl Future<Output = FetchResult<Deck>> + Send;

    fn update_card(
        &self,
        card: &Card,
        token: &CancellationToken,
    ) -> impl Future<Output = FetchResult<Card>> + Send;

    fn delete_deck(
        &self,
        id: DeckId,
        token: &CancellationToken,
    ) -> impl Future<Output = FetchResult<()>> + Send;

    fn delete_card(
        &self,
        id: CardId,
        token: &CancellationToken,
    ) -> impl Future<Output = FetchResult<()>> + Send;
}

/// A json-server style REST backend.
pub struct HttpApi {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct DeckBody<'a> {
    id: DeckId,
    name: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewCardBody<'a> {
    front: &'a str,
    back: &'a str,
    deck_id: DeckId,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder, token: &CancellationToken) -> FetchResult<Response> {
        if token.is_cancelled() {
            return Err(FetchError::Cancelled);
        }
        let request = request.build().map_err(transport)?;
        let method = request.method().clone();
        let url = request.url().to_string();
        log::debug!("{method} {url}");
        let response = select! {
            biased;
            _ = token.cancelled() => {
                log::debug!("Cancelled {method} {url}");
                return Err(FetchError::Cancelled);
            }
            response = self.client.execute(request) => response.map_err(transport)?,
        };
        let status = response.status().as_u16();
        if !(200..=399).contains(&status) {
            return Err(ErrorReport::new(format!("{status} from {method} {url}")).into());
        }
        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: &CancellationToken,
    ) -> FetchResult<T> {
        let response = self.send(request, token).await?;
        let bytes = select! {
            biased;
            _ = token.cancelled() => return Err(FetchError::Cancelled),
            bytes = response.bytes() => bytes.map_err(transport)?,
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn transport(e: reqwest::Error) -> FetchError {
    FetchError::Failed(e.into())
}

impl DeckApi for HttpApi {
    async fn list_decks(&self, token: &CancellationToken) -> FetchResult<Vec<Deck>> {
        let request = self.client.get(self.url("/decks?_embed=cards"));
        self.fetch_json(request, token).await
    }

    async fn read_deck(&self, id: DeckId, token: &CancellationToken) -> FetchResult<Deck> {
        let request = self.client.get(self.url(&format!("/decks/{id}?_embed=cards")));
        self.fetch_json(request, token).await
    }

    async fn read_card(&self, id: CardId, token: &CancellationToken) -> FetchResult<Card> {
        let request = self.client.get(self.url(&format!("/cards/{id}")));
        self.fetch_json(request, token).await
    }

    async fn create_deck(&self, fields: &DeckFields, token: &CancellationToken) -> FetchResult<Deck> {
        let request = self.client.post(self.url("/decks")).json(fields);
        self.fetch_json(request, token).await
    }

    async fn create_card(
        &self,
        deck_id: DeckId,
        fields: &CardFields,
        token: &CancellationToken,
    ) -> FetchResult<Card> {
        let body = NewCardBody {
            front: &fields.front,
            back: &fields.back,
            deck_id,
        };
        let request = self.client.post(self.url("/cards")).json(&body);
        self.fetch_json(request, token).await
    }

    async fn update_deck(&self, deck: &Deck, token: &CancellationToken) -> FetchResult<Deck> {
        let body = DeckBody {
            id: deck.id,
            name: &deck.name,
            description: &deck.description,
        };
        let request = self
            .client
            .put(self.url(&format!("/decks/{}", deck.id)))
            .json(&body);
        self.fetch_json(request, token).await
    }

    async fn update_card(&self, card: &Card, token: &CancellationToken) -> FetchResult<Card> {
        let request = self
            .client
            .put(self.url(&format!("/cards/{}", card.id)))
            .json(card);
        self.fetch_json(request, token).await
    }

    async fn delete_deck(&self, id: DeckId, token: &CancellationToken) -> FetchResult<()> {
        let request = self.client.delete(self.url(&format!("/decks/{id}")));
        self.send(request, token).await.map(|_| ())
    }

    async fn delete_card(&self, id: CardId, token: &CancellationToken) -> FetchResult<()> {
        let request = self.client.delete(self.url(&format!("/cards/{id}")));
        self.send(request, token).await.map(|_| ())
    }
}
