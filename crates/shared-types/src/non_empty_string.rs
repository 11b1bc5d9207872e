// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Non-empty string validation utilities
//!
//! [`NonEmptyString`] guarantees at construction that a value contains at least
//! one non-whitespace character. Credentials, the database name and the storage
//! URI are held as `NonEmptyString`, so a blank environment variable is rejected
//! when configuration is loaded.
//!
//! ```rust
//! use shared_types::NonEmptyString;
//!
//! let db_name = NonEmptyString::new("geo_data").expect("valid database name");
//! assert_eq!(db_name.as_str(), "geo_data");
//!
//! assert!(NonEmptyString::new("").is_err());
//! assert!(NonEmptyString::new(" \t\n ").is_err());
//! ```

use core::fmt;

use serde::{Deserialize, Deserializer, de};

/// A non-empty string wrapper that ensures validity at construction
///
/// Leading and trailing whitespace is preserved; only whitespace-only input is
/// rejected. Uses `Box<str>` internally since the value never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyString(Box<str>);

impl NonEmptyString {
    /// Create a new `NonEmptyString` from any string-like input
    ///
    /// # Errors
    ///
    /// Returns a descriptive message if the string is empty or whitespace-only
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if s.trim().is_empty() {
            Err("String cannot be empty or whitespace-only".to_string())
        } else {
            Ok(NonEmptyString(s.into_boxed_str()))
        }
    }

    /// Get a string slice of the contained value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for NonEmptyString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_text_with_surrounding_whitespace() {
        let value = NonEmptyString::new(" hello ").unwrap();
        assert_eq!(value.as_str(), " hello ");
        assert_eq!(value.to_string(), " hello ");
    }

    #[test]
    fn rejects_blank_input() {
        assert!(NonEmptyString::new("").is_err());
        assert!(NonEmptyString::new("   ").is_err());
        assert!(NonEmptyString::new("\t\n").is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok: NonEmptyString = serde_json::from_str("\"mongodb://localhost\"").unwrap();
        assert_eq!(ok.as_str(), "mongodb://localhost");

        let err = serde_json::from_str::<NonEmptyString>("\"  \"");
        assert!(err.is_err());
    }
}
