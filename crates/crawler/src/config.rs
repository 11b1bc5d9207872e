// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Crawler configuration module
//!
//! Settings are read from environment variables (after `.env` has been loaded
//! by the binary) through the `config` crate, then validated into typed
//! configuration for each component.

use std::path::PathBuf;

use api_client::FetchConfig;
use config::{Config, ConfigError, Environment};
use external_apis::{ChainbaseConfig, DEFAULT_CHAINBASE_BASE_URL, PaginationConfig, TimeWindow};
use serde::Deserialize;
use shared_types::NonEmptyString;
use url::Url;

use crate::{
    credentials::CredentialPool,
    error::{CrawlerError, CrawlerResult},
};

/// Flat view of the environment, one field per variable
#[derive(Debug, Deserialize)]
struct RawConfig {
    api_keys: Option<String>,
    mongo_uri: Option<String>,
    db_name: NonEmptyString,
    address_file: PathBuf,
    chainbase_base_url: String,
    http_timeout_seconds: u64,
    http_max_retries: u32,
    http_backoff_base_ms: u64,
    page_size: u32,
    max_pages: u32,
    page_delay_ms: u64,
    tx_from_timestamp: u64,
    tx_end_timestamp: u64,
    backup_dir: PathBuf,
}

/// Validated crawler configuration
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// API keys; the pool size is the batch size
    pub credentials: CredentialPool,
    /// MongoDB connection string, required only for persistence
    pub mongo_uri: Option<NonEmptyString>,
    /// Target database
    pub db_name: NonEmptyString,
    /// Newline-delimited address list
    pub address_file: PathBuf,
    /// HTTP timeout and retry policy
    pub fetch: FetchConfig,
    /// Upstream endpoint and paging
    pub chainbase: ChainbaseConfig,
    /// Directory receiving backup spills
    pub backup_dir: PathBuf,
}

impl CrawlerConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `CrawlerError::Config` if a value is missing or invalid
    pub fn load() -> CrawlerResult<Self> {
        Self::load_from(Environment::default())
    }

    /// Load configuration from an explicit environment source
    ///
    /// # Errors
    ///
    /// Returns `CrawlerError::Config` if a value is missing or invalid
    pub fn load_from(environment: Environment) -> CrawlerResult<Self> {
        let raw = Self::build(environment).map_err(|e| CrawlerError::Config {
            message: format!("failed to load configuration: {e}"),
        })?;
        Self::validate(raw)
    }

    fn build(environment: Environment) -> Result<RawConfig, ConfigError> {
        Config::builder()
            .set_default("db_name", "geo_data")?
            .set_default("address_file", "data/test_user.txt")?
            .set_default("chainbase_base_url", DEFAULT_CHAINBASE_BASE_URL)?
            .set_default("http_timeout_seconds", 10)?
            .set_default("http_max_retries", 3)?
            .set_default("http_backoff_base_ms", 1000)?
            .set_default("page_size", 100)?
            .set_default("max_pages", 100)?
            .set_default("page_delay_ms", 500)?
            .set_default("tx_from_timestamp", TimeWindow::default().from)?
            .set_default("tx_end_timestamp", TimeWindow::default().end)?
            .set_default("backup_dir", ".")?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    fn validate(raw: RawConfig) -> CrawlerResult<Self> {
        let keys = raw
            .api_keys
            .ok_or_else(|| CrawlerError::config("API_KEYS is required"))?;
        let credentials = CredentialPool::from_csv(&keys)?;

        if raw.http_timeout_seconds == 0 {
            return Err(CrawlerError::config("HTTP_TIMEOUT_SECONDS must be greater than 0"));
        }
        if raw.page_size == 0 || raw.max_pages == 0 {
            return Err(CrawlerError::config(
                "PAGE_SIZE and MAX_PAGES must be greater than 0",
            ));
        }
        if raw.tx_from_timestamp > raw.tx_end_timestamp {
            return Err(CrawlerError::config(format!(
                "TX_FROM_TIMESTAMP ({}) is after TX_END_TIMESTAMP ({})",
                raw.tx_from_timestamp, raw.tx_end_timestamp
            )));
        }

        let base_url = Url::parse(&raw.chainbase_base_url).map_err(|e| {
            CrawlerError::config(format!(
                "invalid CHAINBASE_BASE_URL {}: {e}",
                raw.chainbase_base_url
            ))
        })?;

        // Blank means unset; presence is checked before persisting
        let mongo_uri = raw.mongo_uri.and_then(|uri| NonEmptyString::new(uri).ok());

        Ok(Self {
            credentials,
            mongo_uri,
            db_name: raw.db_name,
            address_file: raw.address_file,
            fetch: FetchConfig {
                timeout_seconds: raw.http_timeout_seconds,
                max_retries: raw.http_max_retries,
                backoff_base_ms: raw.http_backoff_base_ms,
                ..FetchConfig::default()
            },
            chainbase: ChainbaseConfig {
                base_url,
                pagination: PaginationConfig {
                    page_size: raw.page_size,
                    max_pages: raw.max_pages,
                    page_delay_ms: raw.page_delay_ms,
                    transaction_window: Some(TimeWindow {
                        from: raw.tx_from_timestamp,
                        end: raw.tx_end_timestamp,
                    }),
                },
            },
            backup_dir: raw.backup_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Environment::default().source(Some(source))
    }

    #[test]
    fn defaults_apply() {
        let config = CrawlerConfig::load_from(env(&[("API_KEYS", "k1,k2")])).unwrap();

        assert_eq!(config.credentials.len(), 2);
        assert_eq!(config.mongo_uri, None);
        assert_eq!(config.db_name.as_str(), "geo_data");
        assert_eq!(config.address_file, PathBuf::from("data/test_user.txt"));
        assert_eq!(config.backup_dir, PathBuf::from("."));
        assert_eq!(config.fetch.timeout_seconds, 10);
        assert_eq!(config.fetch.max_retries, 3);
        assert_eq!(config.fetch.backoff_base_ms, 1000);
        assert_eq!(
            config.chainbase.base_url.as_str(),
            "https://api.chainbase.online/v1/"
        );

        let pagination = &config.chainbase.pagination;
        assert_eq!(pagination.page_size, 100);
        assert_eq!(pagination.max_pages, 100);
        assert_eq!(pagination.page_delay_ms, 500);
        assert_eq!(pagination.transaction_window, Some(TimeWindow::default()));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = CrawlerConfig::load_from(env(&[
            ("API_KEYS", "k1"),
            ("MONGO_URI", "mongodb://localhost:27017"),
            ("DB_NAME", "crawl"),
            ("HTTP_MAX_RETRIES", "5"),
            ("PAGE_DELAY_MS", "0"),
            ("TX_FROM_TIMESTAMP", "10"),
            ("TX_END_TIMESTAMP", "20"),
            ("CHAINBASE_BASE_URL", "http://127.0.0.1:8080/v1"),
        ]))
        .unwrap();

        assert_eq!(
            config.mongo_uri.as_ref().map(NonEmptyString::as_str),
            Some("mongodb://localhost:27017")
        );
        assert_eq!(config.db_name.as_str(), "crawl");
        assert_eq!(config.fetch.max_retries, 5);
        assert_eq!(config.chainbase.pagination.page_delay_ms, 0);
        assert_eq!(
            config.chainbase.pagination.transaction_window,
            Some(TimeWindow { from: 10, end: 20 })
        );
    }

    #[test]
    fn api_keys_are_required() {
        let result = CrawlerConfig::load_from(env(&[]));
        assert!(matches!(result, Err(CrawlerError::Config { .. })));

        let result = CrawlerConfig::load_from(env(&[("API_KEYS", " , ")]));
        assert!(matches!(result, Err(CrawlerError::Config { .. })));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(CrawlerConfig::load_from(env(&[("API_KEYS", "k1"), ("PAGE_SIZE", "0")])).is_err());
        assert!(
            CrawlerConfig::load_from(env(&[("API_KEYS", "k1"), ("HTTP_MAX_RETRIES", "many")]))
                .is_err()
        );
        assert!(
            CrawlerConfig::load_from(env(&[
                ("API_KEYS", "k1"),
                ("TX_FROM_TIMESTAMP", "20"),
                ("TX_END_TIMESTAMP", "10"),
            ]))
            .is_err()
        );
        assert!(
            CrawlerConfig::load_from(env(&[("API_KEYS", "k1"), ("CHAINBASE_BASE_URL", "not a url")]))
                .is_err()
        );
    }

    #[test]
    fn blank_db_name_is_rejected() {
        let result = CrawlerConfig::load_from(env(&[("API_KEYS", "k1"), ("DB_NAME", "  ")]));
        assert!(matches!(result, Err(CrawlerError::Config { .. })));
    }

    #[test]
    fn blank_mongo_uri_is_unset() {
        let config =
            CrawlerConfig::load_from(env(&[("API_KEYS", "k1"), ("MONGO_URI", "  ")])).unwrap();
        assert_eq!(config.mongo_uri, None);
    }
}
