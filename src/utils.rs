//! Utility functions for loading newline-delimited input files.

use crate::error::AirdropError;
use std::path::Path;

/// Read a text file and return its trimmed, non-empty lines in order.
pub async fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>, AirdropError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AirdropError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parse_lines(&content))
}

/// Split text into trimmed lines, dropping the blank ones.
pub fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
