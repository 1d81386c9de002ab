//! Target URL list: one URL per line, trimmed, blank lines skipped.

use std::fs;
use std::path::Path;

use crate::error::ScanError;

/// Parse the list contents. No comment syntax; every non-blank line is a target.
pub fn parse_target_urls(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read and parse the list at `path`.
pub fn read_target_urls(path: &Path) -> Result<Vec<String>, ScanError> {
    let content = fs::read_to_string(path).map_err(|source| ScanError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    let urls = parse_target_urls(&content);
    tracing::debug!("read {} target url(s) from {}", urls.len(), path.display());
    Ok(urls)
}
