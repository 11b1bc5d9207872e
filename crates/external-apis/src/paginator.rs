// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Cursor pagination over Chainbase listing endpoints

use std::time::Duration;

use api_client::{FetchClient, QueryValue};
use serde_json::Value;
use shared_types::{ChainId, Credential};
use tracing::{debug, info, warn};
use url::Url;

use crate::chainbase::{ChainbaseError, Endpoint, Envelope, credential_headers, endpoint_url};

/// Start of the default transaction window, 2024-01-01T00:00:00Z
pub const DEFAULT_WINDOW_FROM: u64 = 1_704_067_200;
/// End of the default transaction window, 2024-04-01T00:00:00Z
pub const DEFAULT_WINDOW_END: u64 = 1_711_929_600;

/// Inclusive unix-seconds bounds sent with transaction listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// `from_timestamp` query value
    pub from: u64,
    /// `end_timestamp` query value
    pub end: u64,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            from: DEFAULT_WINDOW_FROM,
            end: DEFAULT_WINDOW_END,
        }
    }
}

/// Paging behavior for listing endpoints
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// Items requested per page
    pub page_size: u32,
    /// Hard cap on pages fetched per address and endpoint
    pub max_pages: u32,
    /// Pause after every page request
    pub page_delay_ms: u64,
    /// Window applied to transaction listings; `None` disables filtering
    pub transaction_window: Option<TimeWindow>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            max_pages: 100,
            page_delay_ms: 500,
            transaction_window: Some(TimeWindow::default()),
        }
    }
}

impl PaginationConfig {
    /// Delay between consecutive page requests
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

/// Walks pages in order until `next_page` is absent or the cap is hit
#[derive(Debug, Clone)]
pub struct Paginator<'a> {
    http: &'a FetchClient,
    base_url: Url,
    config: PaginationConfig,
}

impl<'a> Paginator<'a> {
    /// Create a paginator resolving endpoints against `base_url`
    pub fn new(http: &'a FetchClient, base_url: Url, config: PaginationConfig) -> Self {
        Self {
            http,
            base_url,
            config,
        }
    }

    /// Paging configuration
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Collect every item of a listing endpoint for one address
    ///
    /// Pages are requested sequentially starting at page 1. An absent response
    /// on any page discards everything collected so far and yields an empty
    /// list.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider error code, a non-conforming response or
    /// an unusable credential
    pub async fn fetch_all(
        &self,
        credential: &Credential,
        endpoint: Endpoint,
        address: &str,
        chain_id: ChainId,
    ) -> Result<Vec<Value>, ChainbaseError> {
        let url = endpoint_url(&self.base_url, endpoint)?;
        let headers = credential_headers(credential)?;
        let delay = self.config.page_delay();

        let mut items = Vec::new();
        let mut page: u64 = 1;
        let mut pages_fetched: u32 = 0;

        loop {
            if pages_fetched >= self.config.max_pages {
                warn!(
                    %endpoint,
                    address,
                    max_pages = self.config.max_pages,
                    "reached page limit, results may be truncated"
                );
                break;
            }

            let params = self.page_params(endpoint, address, chain_id, page);
            debug!(%endpoint, address, page, "requesting page");

            let response = self.http.fetch(&url, &params, &headers).await?;
            pages_fetched += 1;
            tokio::time::sleep(delay).await;

            let Some(response) = response else {
                warn!(
                    %endpoint,
                    address,
                    page,
                    "could not receive data from Chainbase API"
                );
                return Ok(Vec::new());
            };

            let envelope = Envelope::parse(response)?;
            let has_next = envelope.next_page.is_some();
            items.extend(envelope.into_items()?);

            // The cursor value only signals continuation; pages advance by one
            if !has_next {
                break;
            }
            page += 1;
        }

        if items.is_empty() {
            warn!(%endpoint, address, %chain_id, "no items returned");
        } else {
            info!(
                %endpoint,
                address,
                %chain_id,
                items = items.len(),
                pages = pages_fetched,
                "fetched all pages"
            );
        }

        Ok(items)
    }

    fn page_params(
        &self,
        endpoint: Endpoint,
        address: &str,
        chain_id: ChainId,
        page: u64,
    ) -> Vec<(&'static str, QueryValue)> {
        let mut params = vec![
            ("chain_id", QueryValue::from(chain_id.chain_id())),
            ("address", QueryValue::from(address)),
            ("page", QueryValue::from(page)),
            ("limit", QueryValue::from(self.config.page_size)),
        ];

        if endpoint == Endpoint::Transactions
            && let Some(window) = self.config.transaction_window
        {
            params.push(("from_timestamp", QueryValue::from(window.from)));
            params.push(("end_timestamp", QueryValue::from(window.end)));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use api_client::FetchConfig;

    use super::*;

    fn paginator(http: &FetchClient) -> Paginator<'_> {
        let base = Url::parse("https://api.chainbase.online/v1/").unwrap();
        Paginator::new(http, base, PaginationConfig::default())
    }

    #[test]
    fn default_window_covers_first_quarter_2024() {
        let window = TimeWindow::default();
        assert_eq!(window.from, 1_704_067_200);
        assert_eq!(window.end, 1_711_929_600);
        assert_eq!(PaginationConfig::default().page_delay(), Duration::from_millis(500));
    }

    #[test]
    fn window_only_applies_to_transactions() {
        let http = FetchClient::new(FetchConfig::default());
        let paginator = paginator(&http);

        let tokens = paginator.page_params(Endpoint::Tokens, "0xA", ChainId::ETHEREUM, 1);
        assert_eq!(tokens.len(), 4);
        assert!(tokens.iter().all(|(key, _)| !key.ends_with("_timestamp")));

        let txs = paginator.page_params(Endpoint::Transactions, "0xA", ChainId::ETHEREUM, 3);
        assert_eq!(txs.len(), 6);
        assert_eq!(txs[2], ("page", QueryValue::UInt(3)));
        assert_eq!(txs[4], ("from_timestamp", QueryValue::UInt(DEFAULT_WINDOW_FROM)));
    }

    #[test]
    fn disabled_window_sends_no_bounds() {
        let http = FetchClient::new(FetchConfig::default());
        let base = Url::parse("https://api.chainbase.online/v1/").unwrap();
        let config = PaginationConfig {
            transaction_window: None,
            ..PaginationConfig::default()
        };
        let paginator = Paginator::new(&http, base, config);

        let txs = paginator.page_params(Endpoint::Transactions, "0xA", ChainId::BSC, 1);
        assert_eq!(txs.len(), 4);
        assert_eq!(txs[0], ("chain_id", QueryValue::UInt(56)));
    }
}
