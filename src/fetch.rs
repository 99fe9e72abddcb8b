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

use std::sync::Mutex;
use std::sync::PoisonError;

use tokio_util::sync::CancellationToken;

/// Holds the one outstanding cancellable fetch of a view. Starting a new
/// fetch cancels the previous one.
#[derive(Default)]
pub struct FetchSlot {
    current: Mutex<Option<CancellationToken>>,
}

/// Cancels its token when dropped, i.e. when the view that started the fetch
/// is torn down.
pub struct FetchGuard {
    token: CancellationToken,
}

impl FetchSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> FetchGuard {
        let token = CancellationToken::new();
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.replace(token.clone()) {
            if !previous.is_cancelled() {
                log::debug!("Superseding an in-flight fetch");
                previous.cancel();
            }
        }
        FetchGuard { token }
    }

    pub fn cancel(&self) {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = current.as_ref() {
            token.cancel();
        }
    }
}

impl FetchGuard {
    /// A fetch owned by a single request. It is cancelled with `parent` or when
    /// the guard is dropped, and never by another request.
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self {
            token: parent.child_token(),
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
