// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Per-address enrichment
//!
//! An address is enriched by three independent lookups issued concurrently:
//! held tokens, transactions inside the configured window and the native
//! balance. All three must succeed for the address to be stored in full.

use external_apis::ChainbaseClient;
use shared_types::{ChainId, Credential, DegradedAddress, EnrichedAddress, StoredAddress};
use tracing::{debug, error};

use crate::error::EnrichmentError;

/// Result of enriching one address
#[derive(Debug)]
pub struct AddressOutcome {
    /// The input address
    pub address: String,
    /// Enriched record, or the sub-fetch that failed
    pub result: Result<EnrichedAddress, EnrichmentError>,
}

impl AddressOutcome {
    /// Whether enrichment failed
    pub fn is_degraded(&self) -> bool {
        self.result.is_err()
    }

    /// Document persisted for this address
    pub fn to_document(&self) -> StoredAddress {
        match &self.result {
            Ok(record) => StoredAddress::Enriched(record.clone()),
            Err(_) => StoredAddress::Degraded(DegradedAddress::new(self.address.clone())),
        }
    }
}

/// Enriches addresses through a [`ChainbaseClient`]
#[derive(Debug)]
pub struct AddressEnricher<'a> {
    client: ChainbaseClient<'a>,
}

impl<'a> AddressEnricher<'a> {
    /// Create an enricher issuing lookups through `client`
    pub fn new(client: ChainbaseClient<'a>) -> Self {
        Self { client }
    }

    /// Fetch tokens, transactions and balance for `address`
    ///
    /// Never fails: a failing lookup is logged and recorded in the outcome.
    pub async fn enrich(
        &self,
        credential: &Credential,
        address: &str,
        chain_id: ChainId,
    ) -> AddressOutcome {
        let result = self.fetch(credential, address, chain_id).await;

        match &result {
            Ok(record) => debug!(
                address,
                tokens = record.tokens.len(),
                transactions = record.transactions.len(),
                "address enriched"
            ),
            Err(error) => error!(address, %error, credential = %credential, "error processing address"),
        }

        AddressOutcome {
            address: address.to_string(),
            result,
        }
    }

    async fn fetch(
        &self,
        credential: &Credential,
        address: &str,
        chain_id: ChainId,
    ) -> Result<EnrichedAddress, EnrichmentError> {
        let tokens = async {
            self.client
                .get_tokens(credential, address, chain_id)
                .await
                .map_err(EnrichmentError::Tokens)
        };
        let transactions = async {
            self.client
                .get_transactions(credential, address, chain_id)
                .await
                .map_err(EnrichmentError::Transactions)
        };
        let balance = async {
            self.client
                .get_balance(credential, address, chain_id)
                .await
                .map_err(EnrichmentError::Balance)
        };

        let (tokens, transactions, balance) = tokio::try_join!(tokens, transactions, balance)?;

        Ok(EnrichedAddress {
            address: address.to_string(),
            tokens: tokens.into_iter().map(|t| t.contract_address).collect(),
            transactions: transactions.into_iter().map(Into::into).collect(),
            balance,
        })
    }
}
