//! Error kinds surfaced by the scan pipeline.
//!
//! `Input` and store-open failures end the run; everything else is reported
//! per target or per link and the scan moves on.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Connection, DNS, TLS or timeout failure reported by libcurl.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// Favicon GET failed at the transport level, so no digests were computed.
    #[error("calculating hash for {url} failed: {source}")]
    Digest {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// Page responded with a non-2xx status.
    #[error("{url} returned HTTP {code}")]
    Status { url: String, code: u32 },

    /// Insert into the favicon store failed.
    #[error("storing {link} failed: {source}")]
    Storage {
        link: String,
        #[source]
        source: sqlx::Error,
    },

    /// Worker for a target or fetch panicked or was cancelled.
    #[error("scan of {url} aborted: {message}")]
    Task { url: String, message: String },

    /// Target URL list missing or unreadable.
    #[error("cannot read URL list {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Short label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::Transport { .. } => "transport",
            ScanError::Digest { .. } => "digest",
            ScanError::Status { .. } => "status",
            ScanError::Storage { .. } => "storage",
            ScanError::Task { .. } => "task",
            ScanError::Input { .. } => "input",
        }
    }

    /// True for curl timeouts (connect or whole-transfer).
    pub fn is_timeout(&self) -> bool {
        match self {
            ScanError::Transport { source, .. } | ScanError::Digest { source, .. } => {
                source.is_operation_timedout()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display_names_url_and_code() {
        let e = ScanError::Status {
            url: "http://a.com".to_string(),
            code: 404,
        };
        assert_eq!(e.to_string(), "http://a.com returned HTTP 404");
        assert_eq!(e.kind(), "status");
        assert!(!e.is_timeout());
    }

    #[test]
    fn task_error_display_names_url() {
        let e = ScanError::Task {
            url: "http://a.com".to_string(),
            message: "panicked".to_string(),
        };
        assert_eq!(e.to_string(), "scan of http://a.com aborted: panicked");
        assert_eq!(e.kind(), "task");
        assert!(!e.is_timeout());
    }

    #[test]
    fn input_error_display_names_path() {
        let e = ScanError::Input {
            path: PathBuf::from("/nope/urls.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/nope/urls.txt"));
        assert!(msg.contains("missing"));
        assert_eq!(e.kind(), "input");
    }

    #[test]
    fn storage_error_keeps_source() {
        let e = ScanError::Storage {
            link: "http://a.com/favicon.ico".to_string(),
            source: sqlx::Error::PoolClosed,
        };
        assert!(e.to_string().starts_with("storing http://a.com/favicon.ico failed"));
        assert!(std::error::Error::source(&e).is_some());
    }
}
