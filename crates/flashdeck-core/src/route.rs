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

use std::fmt::Display;
use std::fmt::Formatter;

use crate::types::id::CardId;
use crate::types::id::DeckId;

/// Every page of the application, addressed by URL path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/`: the deck list.
    Home,
    /// `/decks/new`
    NewDeck,
    /// `/decks/:id`
    Deck(DeckId),
    /// `/decks/:id/edit`
    EditDeck(DeckId),
    /// `/decks/:id/study`
    Study(DeckId),
    /// `/decks/:id/delete`: confirmation before deleting the deck.
    DeleteDeck(DeckId),
    /// `/decks/:id/cards/new`
    NewCard(DeckId),
    /// `/decks/:id/cards/:cardId/edit`
    EditCard(DeckId, CardId),
    /// `/decks/:id/cards/:cardId/delete`: confirmation before deleting the card.
    DeleteCard(DeckId, CardId),
}

impl Route {
    /// Map a URL path to a route. Returns `None` for anything the application
    /// does not serve, including malformed ids.
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => Route::Home,
            ["decks", "new"] => Route::NewDeck,
            ["decks", id] => Route::Deck(id.parse().ok()?),
            ["decks", id, "edit"] => Route::EditDeck(id.parse().ok()?),
            ["decks", id, "study"] => Route::Study(id.parse().ok()?),
            ["decks", id, "delete"] => Route::DeleteDeck(id.parse().ok()?),
            ["decks", id, "cards", "new"] => Route::NewCard(id.parse().ok()?),
            ["decks", id, "cards", card_id, "edit"] => {
                Route::EditCard(id.parse().ok()?, card_id.parse().ok()?)
            }
            ["decks", id, "cards", card_id, "delete"] => {
                Route::DeleteCard(id.parse().ok()?, card_id.parse().ok()?)
            }
            _ => return None,
        };
        Some(route)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::NewDeck => write!(f, "/decks/new"),
            Route::Deck(id) => write!(f, "/decks/{id}"),
            Route::EditDeck(id) => write!(f, "/decks/{id}/edit"),
            Route::Study(id) => write!(f, "/decks/{id}/study"),
            Route::DeleteDeck(id) => write!(f, "/decks/{id}/delete"),
            Route::NewCard(id) => write!(f, "/decks/{id}/cards/new"),
            Route::EditCard(id, card_id) => write!(f, "/decks/{id}/cards/{card_id}/edit"),
            Route::DeleteCard(id, card_id) => write!(f, "/decks/{id}/cards/{card_id}/delete"),
        }
    }
}
