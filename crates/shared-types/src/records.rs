// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Upstream records and persisted document shapes
//!
//! The provider returns rich token and transaction objects; the crawler keeps a
//! narrow projection of each. The persisted document is either a fully
//! [`EnrichedAddress`] or the [`DegradedAddress`] fallback, which deliberately
//! carries empty lists and no `balance` key.

use serde::{Deserialize, Serialize};

/// A token held by an address, as listed by the provider
///
/// Only the contract address is retained; other provider fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRecord {
    /// Token contract address
    pub contract_address: String,
}

/// A transaction involving an address, as listed by the provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionRecord {
    /// Transferred value as decimal text
    pub value: String,
    /// Block timestamp as reported by the provider
    pub block_timestamp: String,
}

/// Persisted projection of a [`TransactionRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    /// Transferred value as decimal text
    pub value: String,
    /// Block timestamp as reported by the provider
    pub block_timestamp: String,
}

impl From<TransactionRecord> for TransactionSummary {
    fn from(record: TransactionRecord) -> Self {
        Self {
            value: record.value,
            block_timestamp: record.block_timestamp,
        }
    }
}

/// Fully enriched address, the unit persisted on success
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedAddress {
    /// The enriched address
    pub address: String,
    /// Contract addresses of held tokens
    pub tokens: Vec<String>,
    /// Transactions within the configured time window
    pub transactions: Vec<TransactionSummary>,
    /// Native balance as reported by the provider
    pub balance: String,
}

/// Fallback document for an address whose enrichment failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegradedAddress {
    /// The address that failed enrichment
    pub address: String,
    /// Always empty
    pub tokens: Vec<String>,
    /// Always empty
    pub transactions: Vec<TransactionSummary>,
}

impl DegradedAddress {
    /// Degraded document for `address`
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            tokens: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

/// Document written to storage and to backup files
///
/// Untagged so the stored shape is exactly the inner record. `Enriched` is tried
/// first when reading back; documents without a `balance` key are `Degraded`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredAddress {
    /// All sub-fetches succeeded
    Enriched(EnrichedAddress),
    /// At least one sub-fetch failed
    Degraded(DegradedAddress),
}

impl StoredAddress {
    /// The address this document describes
    pub fn address(&self) -> &str {
        match self {
            Self::Enriched(record) => &record.address,
            Self::Degraded(record) => &record.address,
        }
    }

    /// Whether this is the degraded fallback shape
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn token_record_ignores_extra_fields() {
        let token: TokenRecord = serde_json::from_value(json!({
            "contract_address": "0xT1",
            "name": "Token",
            "decimals": 18
        }))
        .unwrap();
        assert_eq!(token.contract_address, "0xT1");
    }

    #[test]
    fn transaction_record_requires_projection_fields() {
        let missing = serde_json::from_value::<TransactionRecord>(json!({ "value": "1" }));
        assert!(missing.is_err());
    }

    #[test]
    fn degraded_document_has_no_balance_key() {
        let doc = StoredAddress::Degraded(DegradedAddress::new("0xA"));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({ "address": "0xA", "tokens": [], "transactions": [] })
        );
    }

    #[test]
    fn enriched_document_shape() {
        let doc = StoredAddress::Enriched(EnrichedAddress {
            address: "0xA".to_string(),
            tokens: vec!["0xT1".to_string()],
            transactions: vec![TransactionSummary {
                value: "5".to_string(),
                block_timestamp: "2024-01-02T00:00:00Z".to_string(),
            }],
            balance: "100".to_string(),
        });
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({
                "address": "0xA",
                "tokens": ["0xT1"],
                "transactions": [{ "value": "5", "block_timestamp": "2024-01-02T00:00:00Z" }],
                "balance": "100"
            })
        );
    }

    #[test]
    fn read_back_distinguishes_shapes() {
        let degraded: StoredAddress =
            serde_json::from_value(json!({ "address": "0xB", "tokens": [], "transactions": [] }))
                .unwrap();
        assert!(degraded.is_degraded());
        assert_eq!(degraded.address(), "0xB");

        let enriched: StoredAddress = serde_json::from_value(json!({
            "address": "0xC", "tokens": [], "transactions": [], "balance": "0"
        }))
        .unwrap();
        assert!(!enriched.is_degraded());
    }
}
