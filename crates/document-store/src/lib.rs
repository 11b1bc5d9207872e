// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Persistence for enriched address documents
//!
//! The crawler writes each run's documents through a [`DocumentStore`]. The
//! production implementation is [`MongoStore`]; [`MemoryStore`] backs tests and
//! dry runs. When the store rejects a write, [`BackupWriter`] spills the same
//! documents to a timestamped JSON file so no fetched data is lost.

use std::future::Future;

use shared_types::{ChainId, StoredAddress};

pub mod backup;
pub mod error;
pub mod memory;
pub mod mongo;

pub use backup::BackupWriter;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Schema version embedded in collection names
pub const COLLECTION_VERSION: &str = "v4";

/// Collection holding documents for `chain_id`, e.g. `user_data_v4_1`
pub fn collection_name(chain_id: ChainId) -> String {
    format!("user_data_{COLLECTION_VERSION}_{chain_id}")
}

/// A sink for address documents
pub trait DocumentStore: Send + Sync {
    /// Insert all records in one unordered bulk write
    ///
    /// Returns the number of documents written.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected
    fn insert_many(&self, records: &[StoredAddress])
    -> impl Future<Output = StoreResult<usize>> + Send;

    /// Look up the document stored for `address`
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried
    fn get(&self, address: &str)
    -> impl Future<Output = StoreResult<Option<StoredAddress>>> + Send;

    /// Store identifier used in logs
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_are_versioned_per_chain() {
        assert_eq!(collection_name(ChainId::ETHEREUM), "user_data_v4_1");
        assert_eq!(collection_name(ChainId::new(8453)), "user_data_v4_8453");
    }
}
