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

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use flashdeck_core::DeckId;
use flashdeck_core::study::StudySession;
use tokio_util::sync::CancellationToken;

use crate::api::HttpApi;
use crate::fetch::FetchGuard;
use crate::store::DeckStore;

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<DeckStore<HttpApi>>,
    /// Parent of every request's fetch token; cancelled on shutdown.
    fetches: CancellationToken,
    sessions: Arc<Mutex<HashMap<DeckId, StudySession>>>,
}

impl ServerState {
    pub fn new(api: HttpApi) -> Self {
        Self {
            store: Arc::new(DeckStore::new(api)),
            fetches: CancellationToken::new(),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Study sessions by deck.
    pub fn sessions(&self) -> MutexGuard<'_, HashMap<DeckId, StudySession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a fetch owned by the current request. Dropping the guard with
    /// the request cancels it.
    pub fn begin_fetch(&self) -> FetchGuard {
        FetchGuard::child_of(&self.fetches)
    }

    pub fn cancel_fetches(&self) {
        self.store.cancel_reload();
        self.fetches.cancel();
    }
}
