//! Favicon link extraction from raw page text.
//!
//! The pattern runs over the whole document, not just `<link>` attributes, so
//! it also picks up mentions inside scripts, comments or plain text. That is
//! accepted: a false positive costs one extra GET and the hash is still of
//! whatever the server returns.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static FAVICON_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(https?://[^"\s]*?/favicon\.ico|/favicon\.ico|favicon\.ico)"#)
        .expect("favicon pattern is valid")
});

/// Returns distinct favicon references in order of first appearance.
///
/// Matching is case-insensitive; deduplication is on the exact matched text.
pub fn extract_favicon_links(content: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut links = Vec::new();
    for m in FAVICON_REGEX.find_iter(content) {
        if seen.insert(m.as_str()) {
            links.push(m.as_str().to_string());
        }
    }
    links
}
