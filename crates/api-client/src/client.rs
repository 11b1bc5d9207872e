// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Rate-limited fetch client
//!
//! [`FetchClient`] owns the connection pool used for every upstream call. It is
//! constructed unstarted, started once by the owner of the run, and shared by
//! reference with every component that needs network access. Dropping the
//! client releases the pool, so error paths that skip [`FetchClient::close`]
//! still clean up.

use std::sync::atomic::{AtomicU32, Ordering};

use reqwest::{Client, RequestBuilder, StatusCode, header::HeaderMap};
use serde_json::Value;
use tokio::time::timeout;
use tokio_retry::RetryIf;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::{FetchConfig, FetchError, QueryValue, normalize_params};

/// HTTP client with timeout, retry and 404 classification
#[derive(Debug)]
pub struct FetchClient {
    config: FetchConfig,
    session: Option<Client>,
}

impl FetchClient {
    /// Create an unstarted client
    pub fn new(config: FetchConfig) -> Self {
        debug!("HTTP client initialized but not started yet");
        Self {
            config,
            session: None,
        }
    }

    /// Create and start a client in one step
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying connection pool cannot be built
    pub fn started(config: FetchConfig) -> Result<Self, FetchError> {
        let mut client = Self::new(config);
        client.start()?;
        Ok(client)
    }

    /// Build the connection pool; a no-op if already started
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying connection pool cannot be built
    pub fn start(&mut self) -> Result<(), FetchError> {
        if self.session.is_some() {
            info!("HTTP session is already started");
            return Ok(());
        }

        let client = Client::builder()
            .timeout(self.config.timeout())
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| FetchError::from_reqwest(&e, self.config.timeout_seconds))?;

        self.session = Some(client);
        info!(
            timeout_seconds = self.config.timeout_seconds,
            max_retries = self.config.max_retries,
            "HTTP session started"
        );
        Ok(())
    }

    /// Release the connection pool
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            info!("HTTP session closed");
        }
    }

    /// Whether [`start`](Self::start) has been called and the client not closed
    pub fn is_started(&self) -> bool {
        self.session.is_some()
    }

    /// Client configuration
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Send a `GET` and decode the JSON body, retrying transient failures
    ///
    /// # Returns
    ///
    /// * `Ok(Some(value))` on success
    /// * `Ok(None)` on HTTP 404 or once the retry budget is exhausted
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotStarted`] if the client has not been started
    pub async fn fetch(
        &self,
        url: &Url,
        params: &[(&str, QueryValue)],
        headers: &HeaderMap,
    ) -> Result<Option<Value>, FetchError> {
        let Some(session) = &self.session else {
            error!(%url, "HTTP session must be started before use via start()");
            return Err(FetchError::NotStarted);
        };

        let query = normalize_params(params);
        let max_retries = self.config.max_retries;
        let attempts = AtomicU32::new(0);

        let result = RetryIf::spawn(
            self.config.backoff_schedule(),
            || {
                let attempt = attempts.fetch_add(1, Ordering::Relaxed);
                let request = session
                    .get(url.clone())
                    .query(&query)
                    .headers(headers.clone());

                async move {
                    debug!(%url, attempt = attempt + 1, "sending request");
                    let outcome = self.send(request).await;

                    if let Err(error) = &outcome
                        && error.is_retryable()
                        && attempt < max_retries
                    {
                        let wait = self.config.backoff_delay(attempt);
                        warn!(
                            %url,
                            %error,
                            "request failed, retrying in {:?} (attempt {}/{})",
                            wait,
                            attempt + 1,
                            max_retries
                        );
                    }

                    outcome
                }
            },
            FetchError::is_retryable,
        )
        .await;

        match result {
            Ok(value) => {
                info!(%url, "request succeeded");
                Ok(Some(value))
            }
            Err(FetchError::NotFound) => {
                info!(%url, "resource not found (404), not retrying");
                Ok(None)
            }
            Err(FetchError::NotStarted) => Err(FetchError::NotStarted),
            Err(error) => {
                error!(%url, %error, "request failed after {} retries", max_retries);
                Ok(None)
            }
        }
    }

    /// One attempt: send, classify the status, decode the body
    async fn send(&self, request: RequestBuilder) -> Result<Value, FetchError> {
        let seconds = self.config.timeout_seconds;

        let exchange = async {
            let response = request
                .send()
                .await
                .map_err(|e| FetchError::from_reqwest(&e, seconds))?;

            match response.status() {
                StatusCode::NOT_FOUND => Err(FetchError::NotFound),
                status if !status.is_success() => Err(FetchError::Status {
                    status: status.as_u16(),
                }),
                _ => response
                    .json::<Value>()
                    .await
                    .map_err(|e| FetchError::from_reqwest(&e, seconds)),
            }
        };

        timeout(self.config.timeout(), exchange)
            .await
            .map_err(|_| FetchError::Timeout { seconds })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_before_start_is_rejected() {
        let client = FetchClient::new(FetchConfig::default());
        let url = Url::parse("http://127.0.0.1:9/unused").unwrap();

        let result = client.fetch(&url, &[], &HeaderMap::new()).await;
        assert!(matches!(result, Err(FetchError::NotStarted)));
    }

    #[test]
    fn start_is_idempotent_and_close_resets() {
        let mut client = FetchClient::new(FetchConfig::default());
        assert!(!client.is_started());

        client.start().unwrap();
        client.start().unwrap();
        assert!(client.is_started());

        client.close();
        assert!(!client.is_started());
    }

    #[tokio::test]
    async fn fetch_after_close_is_rejected() {
        let mut client = FetchClient::started(FetchConfig::default()).unwrap();
        client.close();
        let url = Url::parse("http://127.0.0.1:9/unused").unwrap();

        let result = client.fetch(&url, &[], &HeaderMap::new()).await;
        assert!(matches!(result, Err(FetchError::NotStarted)));
    }
}
