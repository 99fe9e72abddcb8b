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

use flashdeck_core::Deck;

use crate::api::HttpApi;
use crate::error::Fallible;
use crate::store::DeckStore;

pub async fn list_decks(api_url: &str) -> Fallible<()> {
    let store = DeckStore::new(HttpApi::new(api_url));
    store.reload().await?;
    for deck in store.decks() {
        println!("{}", summary(&deck));
    }
    Ok(())
}

fn summary(deck: &Deck) -> String {
    format!("{}\t{}\t{} cards", deck.id, deck.name, deck.card_count())
}
