// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Chainbase address crawler
//!
//! Reads a list of blockchain addresses, enriches each one with its held
//! tokens, transactions in a time window and native balance, and stores the
//! results in MongoDB.
//!
//! # Architecture
//!
//! - **Configuration**: [`config::CrawlerConfig`] - environment-driven settings
//! - **Credentials**: [`credentials::CredentialPool`] - API keys bounding batch concurrency
//! - **Enrichment**: [`enricher::AddressEnricher`] - concurrent per-address lookups
//! - **Orchestration**: [`orchestrator`] - batching, persistence and backup spill

pub mod config;
pub mod credentials;
pub mod enricher;
pub mod error;
pub mod input;
pub mod orchestrator;

pub use config::CrawlerConfig;
pub use credentials::CredentialPool;
pub use enricher::{AddressEnricher, AddressOutcome};
pub use error::{CrawlerError, CrawlerResult, EnrichmentError};
pub use orchestrator::{Orchestrator, PersistOutcome, RunResult, crawl, execute, persist};
