// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for document persistence

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while persisting or spilling documents
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection, authentication or write failure reported by MongoDB
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Documents could not be encoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backup file could not be written
    #[error("failed to write {path}: {source}")]
    Io {
        /// Target file
        path: PathBuf,
        /// Underlying failure
        source: std::io::Error,
    },

    /// The store refused the operation
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Reason reported by the store
        message: String,
    },
}
