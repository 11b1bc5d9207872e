// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Chainbase Web3 API integration
//!
//! This module provides the client for the Chainbase account endpoints. Every
//! Chainbase response is wrapped in an [`Envelope`] carrying a status code, a
//! message, the payload and an optional pagination cursor. Token and
//! transaction listings are paginated through [`Paginator`]; the native balance
//! is a single lookup.

use std::fmt;

use api_client::{FetchClient, FetchError, QueryValue};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;
use shared_types::{ChainId, Credential, TokenRecord, TransactionRecord};
use thiserror::Error;
use tracing::{debug, error, warn};
use url::Url;

use crate::paginator::{PaginationConfig, Paginator};

/// Default Chainbase API base URL
pub const DEFAULT_CHAINBASE_BASE_URL: &str = "https://api.chainbase.online/v1/";

// Chainbase API constants
const API_KEY_HEADER: &str = "x-api-key";
const SUCCESS_CODE: i64 = 0;
const ZERO_BALANCE: &str = "0";

/// Chainbase account endpoints used by the crawler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /account/tokens`, paginated
    Tokens,
    /// `GET /account/txs`, paginated, filtered by time window
    Transactions,
    /// `GET /account/balance`, single value
    Balance,
}

impl Endpoint {
    /// Path relative to the API base URL
    pub const fn path(self) -> &'static str {
        match self {
            Self::Tokens => "account/tokens",
            Self::Transactions => "account/txs",
            Self::Balance => "account/balance",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

/// Errors specific to the Chainbase API client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ChainbaseError {
    /// The envelope carried a non-success code
    #[error("Chainbase API error {code}: {message}")]
    Provider { code: i64, message: String },

    /// The response did not match the envelope schema
    #[error("unexpected Chainbase response: {message}")]
    SchemaViolation { message: String },

    /// A listed item lacked the fields the crawler projects
    #[error("malformed record from {endpoint}: {message}")]
    MalformedRecord { endpoint: Endpoint, message: String },

    /// No usable response arrived for a single-value lookup
    #[error("no response from {endpoint}")]
    NoResponse { endpoint: Endpoint },

    /// Invalid client configuration or credential
    #[error("configuration error: {0}")]
    Config(String),

    /// The fetch client refused the request
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Standard Chainbase response wrapper
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    /// `0` on success
    pub code: i64,
    /// Human-readable status
    #[serde(default)]
    pub message: String,
    /// Payload; an array for listings, a scalar for the balance
    #[serde(default)]
    pub data: Option<Value>,
    /// Next page number, absent on the last page
    #[serde(default)]
    pub next_page: Option<u64>,
}

impl Envelope {
    /// Validate a raw response into a successful envelope
    ///
    /// # Errors
    ///
    /// Returns `SchemaViolation` for non-object or non-conforming responses and
    /// `Provider` when the code is not success
    pub fn parse(response: Value) -> Result<Self, ChainbaseError> {
        if !response.is_object() {
            error!(%response, "unexpected response from Chainbase API");
            return Err(ChainbaseError::SchemaViolation {
                message: format!("expected a JSON object, got: {response}"),
            });
        }

        let envelope: Envelope =
            serde_json::from_value(response).map_err(|e| ChainbaseError::SchemaViolation {
                message: e.to_string(),
            })?;

        if envelope.code != SUCCESS_CODE {
            warn!(
                code = envelope.code,
                message = %envelope.message,
                "Chainbase API error"
            );
            return Err(ChainbaseError::Provider {
                code: envelope.code,
                message: envelope.message,
            });
        }

        Ok(envelope)
    }

    /// Listing items; `null` or missing data means no items
    ///
    /// # Errors
    ///
    /// Returns `SchemaViolation` if `data` is neither null nor an array
    pub fn into_items(self) -> Result<Vec<Value>, ChainbaseError> {
        match self.data {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(ChainbaseError::SchemaViolation {
                message: format!("expected an array of items, got: {other}"),
            }),
        }
    }
}

/// Configuration for the Chainbase API client
#[derive(Debug, Clone)]
pub struct ChainbaseConfig {
    /// Base URL for the Chainbase API
    pub base_url: Url,
    /// Paging behavior for listing endpoints
    pub pagination: PaginationConfig,
}

/// Chainbase API client
#[derive(Debug)]
pub struct ChainbaseClient<'a> {
    http: &'a FetchClient,
    base_url: Url,
    paginator: Paginator<'a>,
}

impl<'a> ChainbaseClient<'a> {
    /// Create a client issuing requests through `http`
    pub fn new(http: &'a FetchClient, config: ChainbaseConfig) -> Self {
        let base_url = with_trailing_slash(config.base_url);
        let paginator = Paginator::new(http, base_url.clone(), config.pagination);
        Self {
            http,
            base_url,
            paginator,
        }
    }

    /// All tokens held by `address`
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects a page or an item lacks a contract address
    pub async fn get_tokens(
        &self,
        credential: &Credential,
        address: &str,
        chain_id: ChainId,
    ) -> Result<Vec<TokenRecord>, ChainbaseError> {
        let items = self
            .paginator
            .fetch_all(credential, Endpoint::Tokens, address, chain_id)
            .await?;
        decode_items(Endpoint::Tokens, items)
    }

    /// All transactions of `address` inside the configured time window
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects a page or an item lacks the projected fields
    pub async fn get_transactions(
        &self,
        credential: &Credential,
        address: &str,
        chain_id: ChainId,
    ) -> Result<Vec<TransactionRecord>, ChainbaseError> {
        let items = self
            .paginator
            .fetch_all(credential, Endpoint::Transactions, address, chain_id)
            .await?;
        decode_items(Endpoint::Transactions, items)
    }

    /// Native balance of `address`
    ///
    /// `null` data is reported as `"0"`.
    ///
    /// # Errors
    ///
    /// Returns `NoResponse` if no response arrived, otherwise an error if the
    /// provider rejects the request or the payload is not a scalar
    pub async fn get_balance(
        &self,
        credential: &Credential,
        address: &str,
        chain_id: ChainId,
    ) -> Result<String, ChainbaseError> {
        let url = endpoint_url(&self.base_url, Endpoint::Balance)?;
        let headers = credential_headers(credential)?;
        let params = [
            ("chain_id", QueryValue::from(chain_id.chain_id())),
            ("address", QueryValue::from(address)),
        ];

        let Some(response) = self.http.fetch(&url, &params, &headers).await? else {
            error!(address, %chain_id, "could not receive balance from Chainbase API");
            return Err(ChainbaseError::NoResponse {
                endpoint: Endpoint::Balance,
            });
        };

        let envelope = Envelope::parse(response)?;
        let balance = match envelope.data {
            None | Some(Value::Null) => ZERO_BALANCE.to_string(),
            Some(Value::String(balance)) => balance,
            Some(Value::Number(balance)) => balance.to_string(),
            Some(other) => {
                return Err(ChainbaseError::SchemaViolation {
                    message: format!("expected a balance string, got: {other}"),
                });
            }
        };

        debug!(address, %chain_id, balance = %balance, "fetched balance");
        Ok(balance)
    }
}

/// Resolve an endpoint against the base URL
pub(crate) fn endpoint_url(base_url: &Url, endpoint: Endpoint) -> Result<Url, ChainbaseError> {
    base_url
        .join(endpoint.path())
        .map_err(|e| ChainbaseError::Config(format!("invalid base URL {base_url}: {e}")))
}

/// Request headers carrying the credential
pub(crate) fn credential_headers(credential: &Credential) -> Result<HeaderMap, ChainbaseError> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(credential.expose()).map_err(|e| {
        ChainbaseError::Config(format!("invalid API key format for {credential}: {e}"))
    })?;
    headers.insert(API_KEY_HEADER, value);
    headers.insert("accept", HeaderValue::from_static("application/json"));
    Ok(headers)
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn decode_items<T>(endpoint: Endpoint, items: Vec<Value>) -> Result<Vec<T>, ChainbaseError>
where
    T: for<'de> Deserialize<'de>,
{
    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).map_err(|e| ChainbaseError::MalformedRecord {
                endpoint,
                message: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_rejects_non_object() {
        let result = Envelope::parse(json!([1, 2, 3]));
        assert!(matches!(
            result,
            Err(ChainbaseError::SchemaViolation { .. })
        ));
    }

    #[test]
    fn envelope_rejects_missing_code() {
        let result = Envelope::parse(json!({ "message": "ok", "data": [] }));
        assert!(matches!(
            result,
            Err(ChainbaseError::SchemaViolation { .. })
        ));
    }

    #[test]
    fn envelope_non_zero_code_is_provider_error() {
        let result = Envelope::parse(json!({
            "code": 429, "message": "too many requests", "data": null
        }));
        match result {
            Err(ChainbaseError::Provider { code, message }) => {
                assert_eq!(code, 429);
                assert_eq!(message, "too many requests");
            }
            other => panic!("Expected Provider error, got: {other:?}"),
        }
    }

    #[test]
    fn envelope_items() {
        let envelope = Envelope::parse(json!({
            "code": 0, "message": "ok", "data": [{"a": 1}], "next_page": 2
        }))
        .unwrap();
        assert_eq!(envelope.next_page, Some(2));
        assert_eq!(envelope.into_items().unwrap(), vec![json!({"a": 1})]);

        let empty = Envelope::parse(json!({ "code": 0, "message": "ok", "data": null })).unwrap();
        assert!(empty.into_items().unwrap().is_empty());

        let scalar = Envelope::parse(json!({ "code": 0, "message": "ok", "data": "0x1" })).unwrap();
        assert!(scalar.into_items().is_err());
    }

    #[test]
    fn endpoint_urls_join_onto_base_path() {
        let base = with_trailing_slash(Url::parse("https://api.chainbase.online/v1").unwrap());
        assert_eq!(
            endpoint_url(&base, Endpoint::Transactions).unwrap().as_str(),
            "https://api.chainbase.online/v1/account/txs"
        );
        assert_eq!(Endpoint::Tokens.to_string(), "/account/tokens");
    }

    #[test]
    fn credential_headers_carry_key() {
        let credential = Credential::new("secret-key").unwrap();
        let headers = credential_headers(&credential).unwrap();
        assert_eq!(headers.get(API_KEY_HEADER).unwrap(), "secret-key");
    }

    #[test]
    fn decode_items_reports_malformed_records() {
        let result: Result<Vec<TokenRecord>, _> =
            decode_items(Endpoint::Tokens, vec![json!({ "symbol": "USDT" })]);
        assert!(matches!(
            result,
            Err(ChainbaseError::MalformedRecord {
                endpoint: Endpoint::Tokens,
                ..
            })
        ));
    }
}
