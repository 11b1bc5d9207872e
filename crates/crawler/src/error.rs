// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! [`CrawlerError`] aborts a run. Failures scoped to a single address are
//! [`EnrichmentError`]s and never leave the address they belong to.

use std::path::PathBuf;

use api_client::FetchError;
use external_apis::ChainbaseError;
use thiserror::Error;

/// Result type alias for crawler operations
pub type CrawlerResult<T> = Result<T, CrawlerError>;

/// Errors fatal to a crawler run
#[derive(Error, Debug)]
pub enum CrawlerError {
    /// Invalid or unloadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// A batch holds more addresses than there are credentials
    #[error("not enough API keys: batch of {addresses} addresses, {credentials} credentials")]
    CredentialExhaustion {
        /// Addresses in the rejected batch
        addresses: usize,
        /// Credentials available
        credentials: usize,
    },

    /// A setting required for this step was not provided
    #[error("{key} is not set")]
    MissingConfiguration {
        /// Environment key
        key: &'static str,
    },

    /// The address file could not be read
    #[error("failed to read addresses from {path}: {source}")]
    Input {
        /// Address file
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The HTTP client could not be used
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl CrawlerError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Failure of one sub-fetch while enriching an address
#[derive(Error, Debug)]
pub enum EnrichmentError {
    /// Token listing failed
    #[error("failed to fetch tokens: {0}")]
    Tokens(#[source] ChainbaseError),

    /// Transaction listing failed
    #[error("failed to fetch transactions: {0}")]
    Transactions(#[source] ChainbaseError),

    /// Balance lookup failed
    #[error("failed to fetch balance: {0}")]
    Balance(#[source] ChainbaseError),
}
