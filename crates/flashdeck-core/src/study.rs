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

//! The flip-to-reveal study session.

use crate::error::Fallible;
use crate::error::fail;

/// Decks with fewer cards than this cannot be studied.
pub const MIN_STUDY_CARDS: usize = 3;

/// What the study page shows for a deck.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Study {
    Session(StudySession),
    /// Terminal state: the only way forward is adding cards.
    NotEnoughCards { count: usize },
}

impl Study {
    pub fn for_deck(card_count: usize) -> Self {
        match StudySession::new(card_count) {
            Some(session) => Study::Session(session),
            None => Study::NotEnoughCards { count: card_count },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StudySession {
    len: usize,
    card_index: usize,
    flipped: bool,
    restart_pending: bool,
}

/// Result of [`StudySession::next`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Advance {
    /// Moved to the following card.
    Advanced,
    /// The last card was done; the user must choose to restart or leave.
    PromptRestart,
}

/// Result of [`StudySession::answer_restart`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Restart {
    Restarted,
    /// The user declined; they go back to the deck list.
    Exit,
}

impl StudySession {
    pub fn new(len: usize) -> Option<Self> {
        if len < MIN_STUDY_CARDS {
            return None;
        }
        Some(Self {
            len,
            card_index: 0,
            flipped: false,
            restart_pending: false,
        })
    }

    pub fn card_count(&self) -> usize {
        self.len
    }

    pub fn card_index(&self) -> usize {
        self.card_index
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub fn restart_pending(&self) -> bool {
        self.restart_pending
    }

    pub fn flip(&mut self) -> Fallible<()> {
        if self.restart_pending {
            return fail("cannot flip while the restart prompt is open");
        }
        self.flipped = !self.flipped;
        Ok(())
    }

    pub fn next(&mut self) -> Fallible<Advance> {
        if self.restart_pending {
            return fail("restart prompt is already open");
        }
        if !self.flipped {
            return fail("flip the card before moving on");
        }
        self.flipped = false;
        if self.card_index + 1 < self.len {
            self.card_index += 1;
            Ok(Advance::Advanced)
        } else {
            self.restart_pending = true;
            Ok(Advance::PromptRestart)
        }
    }

    pub fn answer_restart(&mut self, confirmed: bool) -> Fallible<Restart> {
        if !self.restart_pending {
            return fail("no restart prompt is open");
        }
        self.restart_pending = false;
        self.flipped = false;
        if confirmed {
            self.card_index = 0;
            Ok(Restart::Restarted)
        } else {
            Ok(Restart::Exit)
        }
    }
}
