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

//! flashdeck-core: types and state machines for the flashdeck flashcard app.
//!
//! Nothing in here performs I/O:
//! - Deck and card types as exchanged with the backend
//! - The study-session state machine
//! - The create/edit form state
//! - Routes, breadcrumbs and action buttons

pub mod breadcrumb;
pub mod button;
pub mod error;
pub mod form;
pub mod route;
pub mod study;
pub mod types;

pub use error::{ErrorReport, FetchError, FetchResult, Fallible, fail, ignore_cancelled};
pub use route::Route;
pub use types::card::{Card, CardFields};
pub use types::deck::{Deck, DeckFields};
pub use types::id::{CardId, DeckId};
