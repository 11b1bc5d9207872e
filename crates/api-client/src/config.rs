// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Fetch client configuration

use std::time::Duration;

// Fetch client constants
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_BASE_MS: u64 = 1000;
const DEFAULT_USER_AGENT: &str = "chainbase-crawler/0.1.0";

/// Configuration for the [`FetchClient`](crate::FetchClient)
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Total timeout per HTTP call in seconds
    pub timeout_seconds: u64,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Wait before the first retry; doubled for each following retry
    pub backoff_base_ms: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    /// Total per-call timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Wait before attempt `attempt + 1`, i.e. `base * 2^attempt`
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(factor))
    }

    /// The full sequence of waits between attempts
    pub fn backoff_schedule(&self) -> Vec<Duration> {
        (0..self.max_retries)
            .map(|attempt| self.backoff_delay(attempt))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn default_schedule_is_one_two_four_seconds() {
        assert_eq!(
            FetchConfig::default().backoff_schedule(),
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4)
            ]
        );
    }

    #[test]
    fn schedule_follows_retry_budget() {
        let config = FetchConfig {
            max_retries: 0,
            ..Default::default()
        };
        assert_eq!(config.backoff_schedule().len(), 0);

        let config = FetchConfig {
            max_retries: 5,
            backoff_base_ms: 10,
            ..Default::default()
        };
        assert_eq!(config.backoff_delay(4), Duration::from_millis(160));
        assert_eq!(config.backoff_schedule().len(), 5);
    }
}
