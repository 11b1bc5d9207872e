// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! JSON spill files for documents the store rejected

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use shared_types::StoredAddress;
use tracing::info;

use crate::{StoreError, StoreResult};

const BACKUP_PREFIX: &str = "backup_results_";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes `backup_results_<YYYYmmdd_HHMMSS>.json` files into a directory
#[derive(Debug, Clone)]
pub struct BackupWriter {
    dir: PathBuf,
}

impl BackupWriter {
    /// Spill into `dir`, which must already exist
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that a spill at `now` would produce
    pub fn path_for(&self, now: DateTime<Utc>) -> PathBuf {
        self.dir
            .join(format!("{BACKUP_PREFIX}{}.json", now.format(TIMESTAMP_FORMAT)))
    }

    /// Write `records` as a pretty-printed JSON array
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the file write fails
    pub async fn write(&self, records: &[StoredAddress], now: DateTime<Utc>) -> StoreResult<PathBuf> {
        let path = self.path_for(now);
        let body = serde_json::to_vec_pretty(records)?;

        tokio::fs::write(&path, body)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), documents = records.len(), "saved backup file");
        Ok(path)
    }
}
