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

//! State of the create/edit form shared by decks and cards.

use crate::breadcrumb::Page;
use crate::error::Fallible;
use crate::error::fail;
use crate::route::Route;
use crate::types::card::Card;
use crate::types::card::CardFields;
use crate::types::deck::Deck;
use crate::types::deck::DeckFields;
use crate::types::id::CardId;
use crate::types::id::DeckId;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormKind {
    Deck,
    Card,
}

impl FormKind {
    /// Names of the two text fields, in display order.
    pub fn keys(self) -> [&'static str; 2] {
        match self {
            FormKind::Deck => ["name", "description"],
            FormKind::Card => ["front", "back"],
        }
    }

    fn title(self) -> &'static str {
        match self {
            FormKind::Deck => "Deck",
            FormKind::Card => "Card",
        }
    }
}

/// What the form creates or edits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormTarget {
    NewDeck,
    EditDeck(DeckId),
    NewCard(DeckId),
    EditCard(DeckId, CardId),
}

/// The single operation a submitted form performs.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    CreateDeck(DeckFields),
    CreateCard(DeckId, CardFields),
    /// The deck's cards are left empty; only its own fields are sent.
    EditDeck(Deck),
    EditCard(Card),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    target: FormTarget,
    values: [String; 2],
}

impl FormState {
    /// Build a form for `kind`, creating or editing depending on `edit`. The
    /// ids come from the URL; the ones the form needs must be present.
    pub fn new(
        kind: FormKind,
        edit: bool,
        deck_id: Option<DeckId>,
        card_id: Option<CardId>,
    ) -> Fallible<Self> {
        let target = match (kind, edit, deck_id, card_id) {
            (FormKind::Deck, false, _, _) => FormTarget::NewDeck,
            (FormKind::Deck, true, Some(deck), _) => FormTarget::EditDeck(deck),
            (FormKind::Card, false, Some(deck), _) => FormTarget::NewCard(deck),
            (FormKind::Card, true, Some(deck), Some(card)) => FormTarget::EditCard(deck, card),
            (FormKind::Deck, true, None, _) => return fail("editing a deck requires its id"),
            (FormKind::Card, _, None, _) => return fail("a card form requires the deck id"),
            (FormKind::Card, true, Some(_), None) => {
                return fail("editing a card requires its id");
            }
        };
        Ok(Self {
            target,
            values: Default::default(),
        })
    }

    /// The form served at `route`, if that route is a form.
    pub fn for_route(route: Route) -> Option<Self> {
        match route {
            Route::NewDeck => Self::new(FormKind::Deck, false, None, None).ok(),
            Route::EditDeck(deck) => Self::new(FormKind::Deck, true, Some(deck), None).ok(),
            Route::NewCard(deck) => Self::new(FormKind::Card, false, Some(deck), None).ok(),
            Route::EditCard(deck, card) => {
                Self::new(FormKind::Card, true, Some(deck), Some(card)).ok()
            }
            _ => None,
        }
    }

    pub fn target(&self) -> FormTarget {
        self.target
    }

    pub fn kind(&self) -> FormKind {
        match self.target {
            FormTarget::NewDeck | FormTarget::EditDeck(_) => FormKind::Deck,
            FormTarget::NewCard(_) | FormTarget::EditCard(_, _) => FormKind::Card,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.target, FormTarget::EditDeck(_) | FormTarget::EditCard(_, _))
    }

    pub fn deck_id(&self) -> Option<DeckId> {
        match self.target {
            FormTarget::NewDeck => None,
            FormTarget::EditDeck(deck) | FormTarget::NewCard(deck) | FormTarget::EditCard(deck, _) => {
                Some(deck)
            }
        }
    }

    /// Fill both fields from an existing deck when editing it.
    pub fn prefill_deck(&mut self, deck: &Deck) {
        if let FormTarget::EditDeck(_) = self.target {
            self.values = [deck.name.clone(), deck.description.clone()];
        }
    }

    /// Fill both fields from an existing card when editing it.
    pub fn prefill_card(&mut self, card: &Card) {
        if let FormTarget::EditCard(_, _) = self.target {
            self.values = [card.front.clone(), card.back.clone()];
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Fallible<()> {
        match self.kind().keys().iter().position(|k| *k == key) {
            Some(idx) => {
                self.values[idx] = value.into();
                Ok(())
            }
            None => fail(format!("unknown form field: {key}")),
        }
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        let idx = self.kind().keys().iter().position(|k| *k == key)?;
        Some(&self.values[idx])
    }

    /// Field names paired with their current values.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.kind()
            .keys()
            .into_iter()
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn page(&self) -> Page {
        match self.target {
            FormTarget::NewDeck => Page::CreateDeck,
            FormTarget::EditDeck(_) => Page::EditDeck,
            FormTarget::NewCard(_) => Page::CreateCard,
            FormTarget::EditCard(_, card) => Page::EditCard(card),
        }
    }

    /// Page heading, e.g. `Spanish: Edit Card`. Only card forms are prefixed
    /// with the deck name.
    pub fn heading(&self, deck_name: Option<&str>) -> String {
        let mode = if self.is_edit() { "Edit" } else { "Create" };
        let title = format!("{mode} {}", self.kind().title());
        match (self.kind(), deck_name) {
            (FormKind::Card, Some(name)) => format!("{name}: {title}"),
            _ => title,
        }
    }

    pub fn submission(&self) -> Submission {
        let [first, second] = self.values.clone();
        match self.target {
            FormTarget::NewDeck => Submission::CreateDeck(DeckFields {
                name: first,
                description: second,
            }),
            FormTarget::EditDeck(id) => Submission::EditDeck(Deck {
                id,
                name: first,
                description: second,
                cards: Vec::new(),
            }),
            FormTarget::NewCard(deck) => Submission::CreateCard(
                deck,
                CardFields {
                    front: first,
                    back: second,
                },
            ),
            FormTarget::EditCard(deck, card) => Submission::EditCard(Card {
                id: card,
                deck_id: deck,
                front: first,
                back: second,
            }),
        }
    }
}
