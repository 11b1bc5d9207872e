// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Batch orchestration and persistence
//!
//! Addresses are split into batches no larger than the credential pool. Each
//! batch is enriched concurrently, one credential per address; batches run one
//! after another. The collected documents are written to the store in a single
//! bulk insert, and spilled to a backup file if that write fails.

use std::path::PathBuf;

use api_client::FetchClient;
use chrono::Utc;
use document_store::{BackupWriter, DocumentStore, MongoStore, StoreError};
use external_apis::ChainbaseClient;
use futures::future::join_all;
use shared_types::{ChainId, NonEmptyString, StoredAddress};
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::{
    config::CrawlerConfig,
    credentials::CredentialPool,
    enricher::{AddressEnricher, AddressOutcome},
    error::{CrawlerError, CrawlerResult},
    input::read_addresses,
};

/// Outcomes of a full run, in input order
#[derive(Debug, Default)]
pub struct RunResult {
    outcomes: Vec<AddressOutcome>,
    batches: usize,
}

impl RunResult {
    /// Per-address outcomes
    pub fn outcomes(&self) -> &[AddressOutcome] {
        &self.outcomes
    }

    /// Documents to persist, one per input address
    pub fn documents(&self) -> Vec<StoredAddress> {
        self.outcomes.iter().map(AddressOutcome::to_document).collect()
    }

    /// Number of addresses processed
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no address was processed
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of batches executed
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Number of addresses stored in degraded form
    pub fn degraded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_degraded()).count()
    }
}

/// What happened to a run's documents
#[derive(Debug)]
pub enum PersistOutcome {
    /// Written to the store
    Inserted(usize),
    /// Nothing to write
    Skipped,
    /// The store failed; documents were written to a backup file
    Spilled {
        /// Backup file
        path: PathBuf,
        /// Store failure
        error: StoreError,
    },
    /// Both the store and the backup failed
    SpillFailed {
        /// Store failure
        error: StoreError,
        /// Backup failure
        backup_error: StoreError,
    },
}

/// Drives enrichment of an address list batch by batch
#[derive(Debug)]
pub struct Orchestrator<'a> {
    enricher: AddressEnricher<'a>,
    credentials: &'a CredentialPool,
    chain_id: ChainId,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator for `chain_id`
    pub fn new(
        enricher: AddressEnricher<'a>,
        credentials: &'a CredentialPool,
        chain_id: ChainId,
    ) -> Self {
        Self {
            enricher,
            credentials,
            chain_id,
        }
    }

    /// Enrich one batch concurrently
    ///
    /// # Errors
    ///
    /// Returns [`CrawlerError::CredentialExhaustion`] without issuing any
    /// request if the batch is larger than the credential pool
    pub async fn process_batch(&self, batch: &[String]) -> CrawlerResult<Vec<AddressOutcome>> {
        let assignments = self.credentials.assign(batch)?;

        let tasks = assignments
            .into_iter()
            .map(|(credential, address)| self.enricher.enrich(credential, address, self.chain_id));

        Ok(join_all(tasks).await)
    }

    /// Enrich every address, batch by batch
    ///
    /// # Errors
    ///
    /// Returns an error if a batch is rejected
    pub async fn run(&self, addresses: &[String]) -> CrawlerResult<RunResult> {
        let batch_size = self.credentials.len();
        let total = addresses.len().div_ceil(batch_size);
        let mut result = RunResult::default();

        for (index, batch) in addresses.chunks(batch_size).enumerate() {
            info!(
                batch = index + 1,
                total,
                addresses = batch.len(),
                "processing batch"
            );
            let outcomes = self.process_batch(batch).await?;
            result.outcomes.extend(outcomes);
            result.batches += 1;
        }

        info!(
            addresses = result.len(),
            batches = result.batches,
            degraded = result.degraded(),
            "crawl finished"
        );
        Ok(result)
    }
}

/// Bulk-insert `documents`, spilling to `backup` if the store fails
pub async fn persist<S: DocumentStore>(
    store: &S,
    backup: &BackupWriter,
    documents: &[StoredAddress],
) -> PersistOutcome {
    if documents.is_empty() {
        warn!("no results to save");
        return PersistOutcome::Skipped;
    }

    match store.insert_many(documents).await {
        Ok(inserted) => {
            info!(store = store.name(), inserted, "saved results");
            PersistOutcome::Inserted(inserted)
        }
        Err(error) => spill(backup, documents, error).await,
    }
}

async fn spill(backup: &BackupWriter, documents: &[StoredAddress], error: StoreError) -> PersistOutcome {
    error!(%error, "failed to save results, writing backup");

    match backup.write(documents, Utc::now()).await {
        Ok(path) => PersistOutcome::Spilled { path, error },
        Err(backup_error) => {
            error!(%backup_error, "failed to write backup file");
            PersistOutcome::SpillFailed {
                error,
                backup_error,
            }
        }
    }
}

/// Read the address file and enrich every address
///
/// # Errors
///
/// Returns an error if the input cannot be read, the HTTP client cannot be
/// started, or a batch is rejected
pub async fn crawl(config: &CrawlerConfig, chain_id: ChainId) -> CrawlerResult<RunResult> {
    let addresses = read_addresses(&config.address_file).await?;

    let mut http = FetchClient::started(config.fetch.clone())?;
    let result = {
        let client = ChainbaseClient::new(&http, config.chainbase.clone());
        let orchestrator =
            Orchestrator::new(AddressEnricher::new(client), &config.credentials, chain_id);
        orchestrator.run(&addresses).await
    };
    http.close();

    result
}

/// Full run: crawl, then persist to MongoDB with backup fallback
///
/// # Errors
///
/// Returns an error if crawling fails or `MONGO_URI` is not configured
pub async fn execute(config: &CrawlerConfig, chain_id: ChainId) -> CrawlerResult<PersistOutcome> {
    let run_id = Uuid::new_v4();
    let span = info_span!("crawl", %run_id, %chain_id);
    execute_run(config, chain_id).instrument(span).await
}

async fn execute_run(config: &CrawlerConfig, chain_id: ChainId) -> CrawlerResult<PersistOutcome> {
    info!(
        credentials = config.credentials.len(),
        address_file = %config.address_file.display(),
        "starting crawl"
    );

    let result = crawl(config, chain_id).await?;

    let Some(uri) = config.mongo_uri.as_ref().map(NonEmptyString::as_str) else {
        error!("MONGO_URI is not set, results were not saved");
        return Err(CrawlerError::MissingConfiguration { key: "MONGO_URI" });
    };

    let documents = result.documents();
    if documents.is_empty() {
        warn!("no results to save");
        return Ok(PersistOutcome::Skipped);
    }

    let backup = BackupWriter::new(&config.backup_dir);
    let outcome = match MongoStore::connect(uri, config.db_name.as_str(), chain_id).await {
        Ok(store) => {
            let outcome = persist(&store, &backup, &documents).await;
            store.close().await;
            outcome
        }
        Err(error) => spill(&backup, &documents, error).await,
    };

    Ok(outcome)
}
