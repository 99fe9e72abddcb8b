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
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ErrorReport;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<u64>()
                    .map(Self)
                    .map_err(|_| ErrorReport::new(format!("invalid {} id: {s:?}", $what)))
            }
        }
    };
}

integer_id!(
    /// Identifies a deck in the backend store.
    DeckId,
    "deck"
);

integer_id!(
    /// Identifies a card in the backend store.
    CardId,
    "card"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_parse() -> Fallible<()> {
        let id: DeckId = "42".parse()?;
        assert_eq!(id, DeckId::new(42));
        assert_eq!(id.to_string(), "42");
        Ok(())
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "4x".parse::<CardId>().unwrap_err();
        assert_eq!(err.to_string(), "error: invalid card id: \"4x\"");
        assert!("-1".parse::<DeckId>().is_err());
        assert!("".parse::<DeckId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() -> Fallible<()> {
        assert_eq!(serde_json::to_string(&CardId::new(7))?, "7");
        let id: DeckId = serde_json::from_str("3")?;
        assert_eq!(id.get(), 3);
        Ok(())
    }
}
