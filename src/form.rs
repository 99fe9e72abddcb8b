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

use std::future::Future;

use flashdeck_core::Card;
use flashdeck_core::CardFields;
use flashdeck_core::CardId;
use flashdeck_core::Deck;
use flashdeck_core::DeckFields;
use flashdeck_core::DeckId;
use flashdeck_core::FetchResult;
use flashdeck_core::Route;
use flashdeck_core::form::FormState;
use flashdeck_core::form::FormTarget;
use flashdeck_core::form::Submission;
use tokio_util::sync::CancellationToken;

use crate::api::DeckApi;
use crate::error::Fallible;
use crate::store::DeckStore;

/// The four operations a form can submit to.
pub trait FormOps: Send + Sync {
    fn add_deck(&self, fields: &DeckFields) -> impl Future<Output = Fallible<DeckId>> + Send;

    fn add_card(
        &self,
        deck_id: DeckId,
        fields: &CardFields,
    ) -> impl Future<Output = Fallible<CardId>> + Send;

    fn edit_deck(&self, deck: &Deck) -> impl Future<Output = Fallible<DeckId>> + Send;

    fn edit_card(&self, card: &Card) -> impl Future<Output = Fallible<CardId>> + Send;
}

impl<A: DeckApi> FormOps for DeckStore<A> {
    async fn add_deck(&self, fields: &DeckFields) -> Fallible<DeckId> {
        DeckStore::add_deck(self, fields).await
    }

    async fn add_card(&self, deck_id: DeckId, fields: &CardFields) -> Fallible<CardId> {
        DeckStore::add_card(self, deck_id, fields).await
    }

    async fn edit_deck(&self, deck: &Deck) -> Fallible<DeckId> {
        DeckStore::edit_deck(self, deck).await
    }

    async fn edit_card(&self, card: &Card) -> Fallible<CardId> {
        DeckStore::edit_card(self, card).await
    }
}

/// A form ready to render, with the deck it belongs to.
pub struct LoadedForm {
    pub form: FormState,
    pub deck: Option<Deck>,
}

/// Fetch what the form shows: the deck (for every form but create-deck)
/// and, when editing a card, the card. Edit forms are pre-populated.
pub async fn load_form<A: DeckApi>(
    api: &A,
    mut form: FormState,
    token: &CancellationToken,
) -> FetchResult<LoadedForm> {
    let deck = match form.deck_id() {
        Some(id) => Some(api.read_deck(id, token).await?),
        None => None,
    };
    if let Some(deck) = &deck {
        form.prefill_deck(deck);
    }
    if let FormTarget::EditCard(_, card_id) = form.target() {
        let card = api.read_card(card_id, token).await?;
        form.prefill_card(&card);
    }
    Ok(LoadedForm { form, deck })
}

/// Perform the submission and return the deck view to go to next.
pub async fn submit<O: FormOps>(ops: &O, submission: Submission) -> Fallible<Route> {
    let deck_id = match submission {
        Submission::CreateDeck(fields) => ops.add_deck(&fields).await?,
        Submission::CreateCard(deck_id, fields) => {
            ops.add_card(deck_id, &fields).await?;
            deck_id
        }
        Submission::EditDeck(deck) => ops.edit_deck(&deck).await?,
        Submission::EditCard(card) => {
            ops.edit_card(&card).await?;
            card.deck_id
        }
    };
    Ok(Route::Deck(deck_id))
}
