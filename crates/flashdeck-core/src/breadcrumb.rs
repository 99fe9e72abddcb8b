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

use crate::types::id::CardId;

/// The page a breadcrumb trail ends in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Page {
    /// The deck view. The deck name itself is the last, active crumb.
    View,
    Study,
    CreateDeck,
    EditDeck,
    CreateCard,
    EditCard(CardId),
}

impl Page {
    /// Text of the trailing crumb, if the page has one.
    pub fn label(&self) -> Option<String> {
        match self {
            Page::View => None,
            Page::Study => Some("Study".to_string()),
            Page::CreateDeck => Some("Create Deck".to_string()),
            Page::EditDeck => Some("Edit Deck".to_string()),
            Page::CreateCard => Some("Add Card".to_string()),
            Page::EditCard(id) => Some(format!("Edit Card {id}")),
        }
    }
}
