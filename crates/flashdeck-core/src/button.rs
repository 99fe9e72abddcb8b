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

use crate::route::Route;
use crate::types::id::CardId;
use crate::types::id::DeckId;

/// The action buttons shown across the application. Each variant carries the
/// ids its target needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Button {
    View(DeckId),
    Study(DeckId),
    DeleteDeck(DeckId),
    DeleteCard(DeckId, CardId),
    EditDeck(DeckId),
    EditCard(DeckId, CardId),
    AddDeck,
    AddCard(DeckId),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Danger,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Icon {
    Eye,
    Journal,
    Trash,
    Pencil,
    Plus,
}

impl Button {
    /// Visible text. Delete buttons show only their icon, so this is used as
    /// their tooltip.
    pub fn label(&self) -> &'static str {
        match self {
            Button::View(_) => "View",
            Button::Study(_) => "Study",
            Button::DeleteDeck(_) => "Delete deck",
            Button::DeleteCard(_, _) => "Delete card",
            Button::EditDeck(_) | Button::EditCard(_, _) => "Edit",
            Button::AddDeck => "Create Deck",
            Button::AddCard(_) => "Add Cards",
        }
    }

    pub fn icon_only(&self) -> bool {
        matches!(self, Button::DeleteDeck(_) | Button::DeleteCard(_, _))
    }

    pub fn icon(&self) -> Icon {
        match self {
            Button::View(_) => Icon::Eye,
            Button::Study(_) => Icon::Journal,
            Button::DeleteDeck(_) | Button::DeleteCard(_, _) => Icon::Trash,
            Button::EditDeck(_) | Button::EditCard(_, _) => Icon::Pencil,
            Button::AddDeck | Button::AddCard(_) => Icon::Plus,
        }
    }

    pub fn style(&self) -> ButtonStyle {
        match self {
            Button::Study(_) | Button::AddCard(_) => ButtonStyle::Primary,
            Button::DeleteDeck(_) | Button::DeleteCard(_, _) => ButtonStyle::Danger,
            Button::View(_) | Button::EditDeck(_) | Button::EditCard(_, _) | Button::AddDeck => {
                ButtonStyle::Secondary
            }
        }
    }

    /// Whether the button is pushed to the right edge of its row.
    pub fn float_right(&self) -> bool {
        matches!(
            self,
            Button::DeleteDeck(_) | Button::DeleteCard(_, _) | Button::EditCard(_, _)
        )
    }

    pub fn target(&self) -> Route {
        match *self {
            Button::View(deck) => Route::Deck(deck),
            Button::Study(deck) => Route::Study(deck),
            Button::DeleteDeck(deck) => Route::DeleteDeck(deck),
            Button::DeleteCard(deck, card) => Route::DeleteCard(deck, card),
            Button::EditDeck(deck) => Route::EditDeck(deck),
            Button::EditCard(deck, card) => Route::EditCard(deck, card),
            Button::AddDeck => Route::NewDeck,
            Button::AddCard(deck) => Route::NewCard(deck),
        }
    }
}
