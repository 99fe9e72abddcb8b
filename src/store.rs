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

//! The deck list and the operations that change it.

use std::future::Future;
use std::sync::PoisonError;
use std::sync::RwLock;

use flashdeck_core::Card;
use flashdeck_core::CardFields;
use flashdeck_core::CardId;
use flashdeck_core::Deck;
use flashdeck_core::DeckFields;
use flashdeck_core::DeckId;
use flashdeck_core::FetchResult;
use flashdeck_core::ignore_cancelled;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::api::DeckApi;
use crate::error::Fallible;
use crate::fetch::FetchSlot;

pub const DELETE_DECK_PROMPT: &str = "Delete this deck?\n\nYou will not be able to recover it.";
pub const DELETE_CARD_PROMPT: &str = "Delete this card?\n\nYou will not be able to recover it.";

/// Asks the user a yes/no question before a destructive operation.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Removal {
    Removed,
    /// The user said no. Nothing was sent to the backend.
    Declined,
}

/// Single source of truth for the deck list.
///
/// The list is never patched locally: every mutation is one remote call
/// followed by a full reload. Mutations are serialized, so a reload always
/// observes the call that preceded it.
pub struct DeckStore<A> {
    api: A,
    decks: RwLock<Vec<Deck>>,
    list_fetch: FetchSlot,
    mutation: Mutex<()>,
}

impl<A: DeckApi> DeckStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            decks: RwLock::new(Vec::new()),
            list_fetch: FetchSlot::new(),
            mutation: Mutex::new(()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Snapshot of the last loaded list.
    pub fn decks(&self) -> Vec<Deck> {
        self.decks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetch the full list from the backend. A newer reload cancels an older
    /// one still in flight; the cancelled one leaves the list untouched and
    /// returns `false`.
    pub async fn reload(&self) -> Fallible<bool> {
        let fetch = self.list_fetch.begin();
        Ok(self.load(fetch.token()).await?.is_some())
    }

    /// Fetch the full list under a caller-owned token and keep it. Returns the
    /// fetched list, or `None` if `token` was cancelled first.
    pub async fn load(&self, token: &CancellationToken) -> Fallible<Option<Vec<Deck>>> {
        let Some(decks) = ignore_cancelled(self.api.list_decks(token).await)? else {
            return Ok(None);
        };
        log::debug!("Loaded {} decks", decks.len());
        *self.decks.write().unwrap_or_else(PoisonError::into_inner) = decks.clone();
        Ok(Some(decks))
    }

    /// Cancel an in-flight reload, if any.
    pub fn cancel_reload(&self) {
        self.list_fetch.cancel();
    }

    async fn mutate<T>(&self, call: impl Future<Output = FetchResult<T>>) -> Fallible<T> {
        let _serial = self.mutation.lock().await;
        let value = call.await?;
        self.reload().await?;
        Ok(value)
    }

    pub async fn add_deck(&self, fields: &DeckFields) -> Fallible<DeckId> {
        let token = CancellationToken::new();
        let deck = self.mutate(self.api.create_deck(fields, &token)).await?;
        log::info!("Created deck {}", deck.id);
        Ok(deck.id)
    }

    pub async fn add_card(&self, deck_id: DeckId, fields: &CardFields) -> Fallible<CardId> {
        let token = CancellationToken::new();
        let card = self
            .mutate(self.api.create_card(deck_id, fields, &token))
            .await?;
        log::info!("Created card {} in deck {deck_id}", card.id);
        Ok(card.id)
    }

    pub async fn edit_deck(&self, deck: &Deck) -> Fallible<DeckId> {
        let token = CancellationToken::new();
        let edited = self.mutate(self.api.update_deck(deck, &token)).await?;
        log::info!("Updated deck {}", edited.id);
        Ok(edited.id)
    }

    pub async fn edit_card(&self, card: &Card) -> Fallible<CardId> {
        let token = CancellationToken::new();
        let edited = self.mutate(self.api.update_card(card, &token)).await?;
        log::info!("Updated card {}", edited.id);
        Ok(edited.id)
    }

    pub async fn remove_deck(&self, id: DeckId, mut confirm: impl Confirm) -> Fallible<Removal> {
        if !confirm.confirm(DELETE_DECK_PROMPT) {
            log::debug!("Deletion of deck {id} declined");
            return Ok(Removal::Declined);
        }
        let token = CancellationToken::new();
        self.mutate(self.api.delete_deck(id, &token)).await?;
        log::info!("Deleted deck {id}");
        Ok(Removal::Removed)
    }

    pub async fn remove_card(&self, id: CardId, mut confirm: impl Confirm) -> Fallible<Removal> {
        if !confirm.confirm(DELETE_CARD_PROMPT) {
            log::debug!("Deletion of card {id} declined");
            return Ok(Removal::Declined);
        }
        let token = CancellationToken::new();
        self.mutate(self.api.delete_card(id, &token)).await?;
        log::info!("Deleted card {id}");
        Ok(Removal::Removed)
    }
}

#[cfg(test)]
mod tests {
    use tokio::join;
    use tokio::task::yield_now;

    use super::*;
    use crate::helper::MemoryBackend;
    use crate::helper::sample_deck;

    fn store() -> DeckStore<MemoryBackend> {
        DeckStore::new(MemoryBackend::with_decks(vec![
            sample_deck(1, "Spanish", 3, 1),
            sample_deck(2, "German", 2, 10),
        ]))
    }

    #[tokio::test]
    async fn test_reload() -> Fallible<()> {
        let store = store();
        assert!(store.decks().is_empty());
        assert!(store.reload().await?);
        let names: Vec<String> = store.decks().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Spanish", "German"]);
        assert_eq!(store.decks()[0].cards.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_mutations_reload_the_list() -> Fallible<()> {
        let store = store();
        store.reload().await?;

        let id = store
            .add_deck(&DeckFields {
                name: "French".to_string(),
                description: "Verbs".to_string(),
            })
            .await?;
        assert_eq!(id, DeckId::new(3));
        assert_eq!(store.decks().len(), 3);

        let card_id = store
            .add_card(
                id,
                &CardFields {
                    front: "être".to_string(),
                    back: "to be".to_string(),
                },
            )
            .await?;
        assert_eq!(store.decks()[2].cards.len(), 1);

        let mut deck = store.decks()[2].clone();
        deck.name = "French II".to_string();
        assert_eq!(store.edit_deck(&deck).await?, id);
        assert_eq!(store.decks()[2].name, "French II");

        let mut card = store.decks()[2].cards[0].clone();
        card.back = "to exist".to_string();
        assert_eq!(store.edit_card(&card).await?, card_id);
        assert_eq!(store.decks()[2].cards[0].back, "to exist");
        Ok(())
    }

    #[tokio::test]
    async fn test_declined_deck_removal_makes_no_calls() -> Fallible<()> {
        let store = store();
        store.reload().await?;
        let before = store.decks();
        let calls = store.api().calls();

        let mut asked = None;
        let removal = store
            .remove_deck(DeckId::new(1), |message: &str| {
                asked = Some(message.to_string());
                false
            })
            .await?;
        assert_eq!(removal, Removal::Declined);
        assert_eq!(asked.as_deref(), Some(DELETE_DECK_PROMPT));
        assert_eq!(store.api().calls(), calls);
        assert_eq!(store.decks(), before);
        Ok(())
    }

    #[tokio::test]
    async fn test_confirmed_removals() -> Fallible<()> {
        let store = store();
        store.reload().await?;

        let removal = store.remove_card(CardId::new(1), |_: &str| true).await?;
        assert_eq!(removal, Removal::Removed);
        assert_eq!(store.decks()[0].cards.len(), 2);

        let removal = store.remove_deck(DeckId::new(2), |_: &str| true).await?;
        assert_eq!(removal, Removal::Removed);
        assert_eq!(store.decks().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_declined_card_removal() -> Fallible<()> {
        let store = store();
        store.reload().await?;
        let removal = store.remove_card(CardId::new(1), |_: &str| false).await?;
        assert_eq!(removal, Removal::Declined);
        assert_eq!(store.decks()[0].cards.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_mutation_propagates() -> Fallible<()> {
        let store = store();
        let missing = Deck {
            id: DeckId::new(42),
            name: String::new(),
            description: String::new(),
            cards: Vec::new(),
        };
        assert!(store.edit_deck(&missing).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_cancelled_reload_keeps_list() -> Fallible<()> {
        let store = store();
        store.reload().await?;
        let before = store.decks();
        store.api().stall_listing();

        let (refreshed, ()) = join!(store.reload(), async {
            yield_now().await;
            store.cancel_reload();
        });
        assert!(!refreshed?);
        assert_eq!(store.decks(), before);
        Ok(())
    }

    #[tokio::test]
    async fn test_mutations_are_serialized() -> Fallible<()> {
        let store = store();
        let french = DeckFields {
            name: "French".to_string(),
            description: String::new(),
        };
        let italian = DeckFields {
            name: "Italian".to_string(),
            description: String::new(),
        };
        let (first, second) = join!(store.add_deck(&french), store.add_deck(&italian));
        assert_eq!(first?, DeckId::new(3));
        assert_eq!(second?, DeckId::new(4));
        assert_eq!(
            store.api().ops(),
            vec!["create_deck", "list_decks", "create_deck", "list_decks"]
        );
        let names: Vec<String> = store.decks().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Spanish", "German", "French", "Italian"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_under_cancelled_token() -> Fallible<()> {
        let store = store();
        store.reload().await?;
        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(store.load(&token).await?, None);
        assert_eq!(store.decks().len(), 2);
        Ok(())
    }
}
