// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the Chainbase address crawler
//!
//! This crate provides the types that cross crate boundaries in the crawler
//! workspace: chain identifiers, provider credentials, the raw records returned
//! by the upstream API and the document shapes persisted to storage.

pub mod chains;
pub mod credential;
pub mod non_empty_string;
pub mod records;

pub use chains::{ChainId, ChainIdParseError};
pub use credential::Credential;
pub use non_empty_string::NonEmptyString;
pub use records::{
    DegradedAddress, EnrichedAddress, StoredAddress, TokenRecord, TransactionRecord,
    TransactionSummary,
};
