// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Fetch error taxonomy

use thiserror::Error;

/// Errors produced while fetching from an upstream API
///
/// Only [`FetchError::NotStarted`] ever leaves [`FetchClient::fetch`](crate::FetchClient::fetch);
/// every other variant classifies a single attempt for the retry loop.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    /// The client was used before `start()`
    #[error("HTTP session has not been started")]
    NotStarted,

    /// HTTP 404, terminal
    #[error("resource not found")]
    NotFound,

    /// Any other non-success HTTP status
    #[error("HTTP error {status}")]
    Status { status: u16 },

    /// Connection, TLS or protocol failure
    #[error("HTTP request failed: {message}")]
    Transport { message: String },

    /// The call exceeded its total timeout
    #[error("request timeout after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// The body was not valid JSON
    #[error("invalid JSON response: {message}")]
    Decode { message: String },
}

impl FetchError {
    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::NotStarted | Self::NotFound)
    }

    pub(crate) fn from_reqwest(error: &reqwest::Error, timeout_seconds: u64) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                seconds: timeout_seconds,
            }
        } else if error.is_decode() {
            Self::Decode {
                message: error.to_string(),
            }
        } else {
            Self::Transport {
                message: error.to_string(),
            }
        }
    }
}
