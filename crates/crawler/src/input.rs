// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Address list input

use std::path::Path;

use tracing::info;

use crate::error::{CrawlerError, CrawlerResult};

/// Read one address per line from `path`
///
/// # Errors
///
/// Returns [`CrawlerError::Input`] if the file cannot be read
pub async fn read_addresses(path: &Path) -> CrawlerResult<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CrawlerError::Input {
            path: path.to_path_buf(),
            source,
        })?;

    let addresses = parse_addresses(&content);
    info!(path = %path.display(), count = addresses.len(), "loaded addresses");
    Ok(addresses)
}

/// Split text into trimmed, non-blank lines
pub fn parse_addresses(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_and_whitespace_are_ignored() {
        let content = "0xA\n\n  0xB  \r\n\t\n0xC";
        assert_eq!(parse_addresses(content), vec!["0xA", "0xB", "0xC"]);
    }

    #[tokio::test]
    async fn missing_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_addresses(&dir.path().join("absent.txt")).await;
        assert!(matches!(result, Err(CrawlerError::Input { .. })));
    }
}
