//! Processing of a single target URL.

use tokio::sync::mpsc;

use crate::checksum;
use crate::error::ScanError;
use crate::extract::extract_favicon_links;
use crate::favicon_db::FaviconDb;
use crate::fetch::{self, HttpOptions};
use crate::resolver::resolve_link;

use super::{emit, ScanEvent, ScanSummary};

/// Run a blocking curl call for `url` off the async executor. A panicked
/// worker becomes `ScanError::Task` for that URL.
async fn blocking<T, F>(url: &str, f: F) -> Result<T, ScanError>
where
    F: FnOnce() -> Result<T, ScanError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(res) => res,
        Err(e) => Err(ScanError::Task {
            url: url.to_string(),
            message: e.to_string(),
        }),
    }
}

pub(super) async fn report(
    events: &mpsc::Sender<ScanEvent>,
    summary: &mut ScanSummary,
    target: &str,
    error: ScanError,
) {
    tracing::warn!(url = target, kind = error.kind(), timeout = error.is_timeout(), "{}", error);
    summary.errors += 1;
    emit(
        events,
        ScanEvent::Error {
            target: target.to_string(),
            error,
        },
    )
    .await;
}

/// Fetch `target`, hash every favicon it references and store the results.
///
/// Page failures end this target; link failures skip that link only.
pub async fn scan_target(
    db: &FaviconDb,
    target: &str,
    opts: &HttpOptions,
    events: &mpsc::Sender<ScanEvent>,
) -> ScanSummary {
    let mut summary = ScanSummary {
        targets: 1,
        ..ScanSummary::default()
    };
    emit(
        events,
        ScanEvent::Target {
            url: target.to_string(),
        },
    )
    .await;

    let page = {
        let url = target.to_string();
        let opts = *opts;
        blocking(target, move || fetch::fetch_page(&url, &opts)).await
    };
    let page = match page {
        Ok(page) => page,
        Err(e) => {
            report(events, &mut summary, target, e).await;
            return summary;
        }
    };

    let links = extract_favicon_links(&page);
    if links.is_empty() {
        tracing::debug!(url = target, "no favicon links");
        emit(
            events,
            ScanEvent::NoLinks {
                url: target.to_string(),
            },
        )
        .await;
        return summary;
    }
    tracing::debug!(url = target, count = links.len(), "found favicon links");

    for reference in links {
        let Some(link) = resolve_link(target, &reference) else {
            tracing::debug!(url = target, "skipping empty favicon reference");
            continue;
        };

        let digests = {
            let url = link.clone();
            let opts = *opts;
            blocking(&link, move || checksum::hash_favicon(&url, &opts)).await
        };
        let digests = match digests {
            Ok(d) => d,
            Err(e) => {
                report(events, &mut summary, target, e).await;
                continue;
            }
        };
        summary.favicons += 1;

        // The favicon line goes out before any storage error for the same link.
        let stored = db.insert_if_absent(&link, &digests.md5, &digests.sha256).await;
        let inserted = matches!(stored, Ok(true));
        if inserted {
            summary.inserted += 1;
        } else if stored.is_ok() {
            tracing::debug!(link, "favicon already stored; keeping existing record");
        }
        emit(
            events,
            ScanEvent::Favicon {
                target: target.to_string(),
                link: link.clone(),
                digests,
                inserted,
            },
        )
        .await;

        if let Err(source) = stored {
            let e = ScanError::Storage { link, source };
            report(events, &mut summary, target, e).await;
        }
    }

    summary
}
