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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(msg: impl Into<String>) -> Self {
        ErrorReport {
            message: msg.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport {
            message: format!("I/O error: {value:#?}"),
        }
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport {
            message: format!("JSON error: {value:#?}"),
        }
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ErrorReport {
    fn from(value: reqwest::Error) -> Self {
        ErrorReport {
            message: format!("HTTP error: {value}"),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {
    fn description(&self) -> &str {
        &self.message
    }
}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport {
        message: msg.into(),
    })
}

/// The outcome of a request to the backend that did not produce data.
///
/// Cancellation is expected: the view that issued the request went away or
/// issued a newer one. Everything else is a failure the view cannot recover
/// from.
#[derive(Debug, PartialEq)]
pub enum FetchError {
    Cancelled,
    Failed(ErrorReport),
}

impl From<ErrorReport> for FetchError {
    fn from(value: ErrorReport) -> Self {
        FetchError::Failed(value)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(value: serde_json::Error) -> Self {
        FetchError::Failed(value.into())
    }
}

impl From<FetchError> for ErrorReport {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::Cancelled => ErrorReport::new("request cancelled"),
            FetchError::Failed(report) => report,
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            FetchError::Cancelled => write!(f, "request cancelled"),
            FetchError::Failed(report) => report.fmt(f),
        }
    }
}

impl Error for FetchError {}

pub type FetchResult<T> = Result<T, FetchError>;

/// Swallow cancellation and propagate everything else.
pub fn ignore_cancelled<T>(result: FetchResult<T>) -> Fallible<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(FetchError::Cancelled) => Ok(None),
        Err(FetchError::Failed(report)) => Err(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ErrorReport::new("deck not found");
        assert_eq!(err.to_string(), "error: deck not found");
        assert_eq!(FetchError::Cancelled.to_string(), "request cancelled");
    }

    #[test]
    fn test_ignore_cancelled() {
        assert_eq!(ignore_cancelled(Ok(5)), Ok(Some(5)));
        assert_eq!(ignore_cancelled::<u8>(Err(FetchError::Cancelled)), Ok(None));
        let failed: FetchResult<u8> = Err(FetchError::Failed(ErrorReport::new("500")));
        assert_eq!(ignore_cancelled(failed), Err(ErrorReport::new("500")));
    }
}
