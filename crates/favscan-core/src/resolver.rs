//! Turns an extracted favicon reference into an absolute URL.
//!
//! Plain string joining against the target URL: no scheme/host parsing, no
//! `../` handling, no percent-decoding, no collapsing of double slashes.

/// Resolves `reference` against `base`.
///
/// - `http://` / `https://` references are returned unchanged.
/// - `/`-prefixed references are appended to `base`.
/// - anything else is appended to `base` with a `/` separator.
///
/// Returns `None` for an empty reference.
pub fn resolve_link(base: &str, reference: &str) -> Option<String> {
    if reference.is_empty() {
        return None;
    }
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return Some(reference.to_string());
    }
    if reference.starts_with('/') {
        return Some(format!("{}{}", base, reference));
    }
    Some(format!("{}/{}", base, reference))
}
