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

use serde::Deserialize;
use serde::Serialize;

use crate::types::card::Card;
use crate::types::id::DeckId;

/// A named collection of cards, as stored by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    pub description: String,
    /// Omitted by the backend when the cards are not embedded.
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Deck {
    /// The deck's own fields, without its cards.
    pub fn fields(&self) -> DeckFields {
        DeckFields {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}

/// The user-editable fields of a deck.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckFields {
    pub name: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::types::id::CardId;

    #[test]
    fn test_deserialize_with_cards() -> Fallible<()> {
        let json = r#"{
            "id": 1,
            "name": "Rendering in React",
            "description": "React's component structure",
            "cards": [{"id": 1, "front": "Q", "back": "A", "deckId": 1}]
        }"#;
        let deck: Deck = serde_json::from_str(json)?;
        assert_eq!(deck.id, DeckId::new(1));
        assert_eq!(deck.card_count(), 1);
        assert_eq!(deck.cards[0].id, CardId::new(1));
        assert_eq!(deck.cards[0].deck_id, DeckId::new(1));
        Ok(())
    }

    #[test]
    fn test_deserialize_without_cards() -> Fallible<()> {
        let deck: Deck = serde_json::from_str(r#"{"id": 2, "name": "A", "description": ""}"#)?;
        assert!(deck.cards.is_empty());
        Ok(())
    }
}
