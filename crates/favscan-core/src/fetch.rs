//! HTTP GET via libcurl (`curl` crate).
//!
//! Every call is blocking and runs in the current thread; call from
//! `spawn_blocking` if used from async code.

use std::time::Duration;

use crate::error::ScanError;

/// Network settings applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    /// Hard wall-clock limit for the whole transfer.
    pub timeout: Duration,
    pub max_redirects: u32,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
        }
    }
}

pub(crate) fn is_success(code: u32) -> bool {
    (200..300).contains(&code)
}

fn new_handle(url: &str, opts: &HttpOptions) -> Result<curl::easy::Easy, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirects)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    Ok(easy)
}

/// GETs `url` and feeds every body chunk to `sink`. Returns the final HTTP status.
///
/// The status is not checked here; callers decide what counts as success.
pub fn stream_body<F>(url: &str, opts: &HttpOptions, mut sink: F) -> Result<u32, ScanError>
where
    F: FnMut(&[u8]),
{
    let transport = |source: curl::Error| ScanError::Transport {
        url: url.to_string(),
        source,
    };

    let mut easy = new_handle(url, opts).map_err(transport)?;
    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                sink(data);
                Ok(data.len())
            })
            .map_err(transport)?;
        transfer.perform().map_err(transport)?;
    }

    easy.response_code().map_err(transport)
}

/// GETs a page and returns its body as text.
///
/// Non-2xx responses become `ScanError::Status`. Invalid UTF-8 is replaced
/// rather than rejected; the extractor only needs ASCII patterns.
pub fn fetch_page(url: &str, opts: &HttpOptions) -> Result<String, ScanError> {
    let mut body: Vec<u8> = Vec::new();
    let code = stream_body(url, opts, |chunk| body.extend_from_slice(chunk))?;
    if !is_success(code) {
        return Err(ScanError::Status {
            url: url.to_string(),
            code,
        });
    }
    tracing::debug!(url, bytes = body.len(), "fetched page");
    Ok(String::from_utf8_lossy(&body).into_owned())
}
