// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory document store

use dashmap::DashMap;
use shared_types::StoredAddress;
use tracing::debug;

use crate::{DocumentStore, StoreResult};

/// Keeps the latest document per address
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: DashMap<String, StoredAddress>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct addresses stored
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    async fn insert_many(&self, records: &[StoredAddress]) -> StoreResult<usize> {
        for record in records {
            self.documents
                .insert(record.address().to_string(), record.clone());
        }
        debug!(inserted = records.len(), "saved documents in memory");
        Ok(records.len())
    }

    async fn get(&self, address: &str) -> StoreResult<Option<StoredAddress>> {
        Ok(self.documents.get(address).map(|entry| entry.value().clone()))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use shared_types::{DegradedAddress, EnrichedAddress};

    use super::*;

    #[tokio::test]
    async fn stores_and_replaces_by_address() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        let degraded = StoredAddress::Degraded(DegradedAddress::new("0xA"));
        let enriched = StoredAddress::Enriched(EnrichedAddress {
            address: "0xA".to_string(),
            tokens: vec!["0xt".to_string()],
            transactions: Vec::new(),
            balance: "7".to_string(),
        });

        assert_eq!(store.insert_many(&[degraded]).await.unwrap(), 1);
        assert_eq!(store.insert_many(&[enriched.clone()]).await.unwrap(), 1);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("0xA").await.unwrap(), Some(enriched));
        assert_eq!(store.get("0xB").await.unwrap(), None);
    }
}
