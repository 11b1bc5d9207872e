// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Provider API credentials

use std::fmt;

use crate::NonEmptyString;

/// Number of leading key characters that may appear in logs
const VISIBLE_PREFIX_LEN: usize = 6;

/// One upstream API key, bound to one concurrent request slot
///
/// `Debug` and `Display` only reveal the first few characters so credentials
/// can be attached to log lines without leaking the secret.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(NonEmptyString);

impl Credential {
    /// Create a credential from a raw key
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or whitespace-only
    pub fn new(key: impl Into<String>) -> Result<Self, String> {
        let key = key.into();
        NonEmptyString::new(key.trim()).map(Self)
    }

    /// The full secret, for use in request headers only
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Log-safe prefix of the key
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.as_str().chars().take(VISIBLE_PREFIX_LEN).collect();
        format!("{prefix}...")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.redacted()).finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}
