// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! API key pool and per-batch credential assignment

use shared_types::Credential;

use crate::error::{CrawlerError, CrawlerResult};

/// Ordered set of upstream API keys
///
/// The pool size bounds how many addresses are enriched concurrently: each
/// address in a batch is bound to the credential at the same position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
}

impl CredentialPool {
    /// Create a pool from explicit credentials
    ///
    /// # Errors
    ///
    /// Returns an error if `credentials` is empty
    pub fn new(credentials: Vec<Credential>) -> CrawlerResult<Self> {
        if credentials.is_empty() {
            return Err(CrawlerError::config("API_KEYS must contain at least one key"));
        }
        Ok(Self { credentials })
    }

    /// Parse a comma-separated key list, ignoring empty entries
    ///
    /// # Errors
    ///
    /// Returns an error if no non-empty key is present
    pub fn from_csv(keys: &str) -> CrawlerResult<Self> {
        let credentials = keys
            .split(',')
            .filter_map(|key| Credential::new(key).ok())
            .collect();
        Self::new(credentials)
    }

    /// Number of credentials, which is also the batch size
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Always false for a constructed pool
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Credentials in configured order
    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.credentials.iter()
    }

    /// Bind each address in `batch` to the credential at its position
    ///
    /// # Errors
    ///
    /// Returns [`CrawlerError::CredentialExhaustion`] if the batch is larger
    /// than the pool
    pub fn assign<'a>(&'a self, batch: &'a [String]) -> CrawlerResult<Vec<(&'a Credential, &'a str)>> {
        if batch.len() > self.credentials.len() {
            return Err(CrawlerError::CredentialExhaustion {
                addresses: batch.len(),
                credentials: self.credentials.len(),
            });
        }

        Ok(self
            .credentials
            .iter()
            .zip(batch)
            .map(|(credential, address)| (credential, address.as_str()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addresses(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn csv_ignores_empty_entries() {
        let pool = CredentialPool::from_csv(" key-1 ,, key-2,").unwrap();
        let keys: Vec<_> = pool.iter().map(Credential::expose).collect();
        assert_eq!(keys, vec!["key-1", "key-2"]);
    }

    #[test]
    fn csv_without_keys_is_rejected() {
        assert!(matches!(
            CredentialPool::from_csv(" , ,"),
            Err(CrawlerError::Config { .. })
        ));
        assert!(CredentialPool::from_csv("").is_err());
    }

    #[test]
    fn assign_binds_by_position() {
        let pool = CredentialPool::from_csv("k1,k2,k3").unwrap();
        let batch = addresses(&["0xA", "0xB"]);

        let assigned = pool.assign(&batch).unwrap();
        let pairs: Vec<_> = assigned
            .iter()
            .map(|(credential, address)| (credential.expose(), *address))
            .collect();
        assert_eq!(pairs, vec![("k1", "0xA"), ("k2", "0xB")]);
    }

    #[test]
    fn assign_rejects_oversized_batch() {
        let pool = CredentialPool::from_csv("k1").unwrap();
        let batch = addresses(&["0xA", "0xB"]);

        match pool.assign(&batch) {
            Err(CrawlerError::CredentialExhaustion {
                addresses,
                credentials,
            }) => {
                assert_eq!(addresses, 2);
                assert_eq!(credentials, 1);
            }
            other => panic!("Expected CredentialExhaustion, got: {other:?}"),
        }
    }
}
