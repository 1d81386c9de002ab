//! Favicon digests: MD5 (fast) and SHA-256 (strong), as lowercase hex.
//!
//! One GET feeds both hashers chunk by chunk, so the favicon is neither
//! fetched twice nor buffered whole.

use md5::Md5;
use sha2::{Digest, Sha256};

use crate::error::ScanError;
use crate::fetch::{self, HttpOptions};

/// MD5 and SHA-256 of the same byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestPair {
    pub md5: String,
    pub sha256: String,
}

/// Running MD5 + SHA-256 over a stream of chunks.
#[derive(Default)]
pub struct DigestAccumulator {
    md5: Md5,
    sha256: Sha256,
    len: u64,
}

impl DigestAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.md5.update(chunk);
        self.sha256.update(chunk);
        self.len += chunk.len() as u64;
    }

    /// Bytes consumed so far.
    pub fn bytes_hashed(&self) -> u64 {
        self.len
    }

    pub fn finish(self) -> DigestPair {
        DigestPair {
            md5: hex::encode(self.md5.finalize()),
            sha256: hex::encode(self.sha256.finalize()),
        }
    }
}

pub fn digest_bytes(data: &[u8]) -> DigestPair {
    let mut acc = DigestAccumulator::new();
    acc.update(data);
    acc.finish()
}

/// Fetches `url` once and digests the response body.
///
/// The status code is not checked: an error page is hashed like any other
/// body. Only transport failures are errors, reported as `ScanError::Digest`.
pub fn hash_favicon(url: &str, opts: &HttpOptions) -> Result<DigestPair, ScanError> {
    let mut acc = DigestAccumulator::new();
    let code = fetch::stream_body(url, opts, |chunk| acc.update(chunk)).map_err(|e| match e {
        ScanError::Transport { url, source } => ScanError::Digest { url, source },
        other => other,
    })?;
    if !fetch::is_success(code) {
        tracing::warn!(url, code, "favicon responded with non-2xx status; hashing body anyway");
    }
    tracing::debug!(url, bytes = acc.bytes_hashed(), "hashed favicon");
    Ok(acc.finish())
}
