//! Scan several target URLs concurrently.
//!
//! Keeps up to `max_concurrent` targets in flight; when one finishes, the
//! next target is started until the list is exhausted. Links within a target
//! are still processed one after another.

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinError;

use crate::error::ScanError;
use crate::favicon_db::FaviconDb;
use crate::fetch::HttpOptions;

use super::target::{report, scan_target};
use super::{ScanEvent, ScanSummary};

/// Map a finished target task to its summary, or `ScanError::Task` if it
/// panicked or was cancelled.
pub(super) fn join_outcome(
    url: &str,
    res: std::result::Result<ScanSummary, JoinError>,
) -> std::result::Result<ScanSummary, ScanError> {
    res.map_err(|e| ScanError::Task {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Runs `targets` with up to `max_concurrent` in flight at once. Each insert is
/// its own statement, so concurrent targets never see a half-written record.
/// A target whose task dies is reported as an error event; the rest still run.
pub async fn run_targets_parallel(
    db: &FaviconDb,
    targets: Vec<String>,
    opts: &HttpOptions,
    max_concurrent: usize,
    events: mpsc::Sender<ScanEvent>,
) -> Result<ScanSummary> {
    let max_concurrent = max_concurrent.max(1);
    let mut pending = targets.into_iter();
    let mut summary = ScanSummary::default();
    let mut join_set = tokio::task::JoinSet::new();

    loop {
        while join_set.len() < max_concurrent {
            let Some(url) = pending.next() else {
                break;
            };
            let db = db.clone();
            let opts = *opts;
            let events = events.clone();
            // Inner task so a panic is caught with the URL still at hand.
            join_set.spawn(async move {
                let target = url.clone();
                let handle =
                    tokio::spawn(async move { scan_target(&db, &target, &opts, &events).await });
                (url, handle.await)
            });
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let (url, outcome) = res.map_err(|e| anyhow::anyhow!("scan task join: {}", e))?;
        match join_outcome(&url, outcome) {
            Ok(target_summary) => summary.absorb(target_summary),
            Err(e) => {
                summary.targets += 1;
                report(&events, &mut summary, &url, e).await;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn panicked_target_task_becomes_task_error() {
        let handle = tokio::spawn(async { panic!("scan blew up") });
        let res: std::result::Result<ScanSummary, JoinError> = match handle.await {
            Ok(()) => Ok(ScanSummary::default()),
            Err(e) => Err(e),
        };
        match join_outcome("http://a.com", res) {
            Err(ScanError::Task { url, message }) => {
                assert_eq!(url, "http://a.com");
                assert!(message.contains("panic"), "{message}");
            }
            other => panic!("expected Task, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn finished_target_task_keeps_summary() {
        let handle = tokio::spawn(async {
            ScanSummary {
                targets: 1,
                favicons: 1,
                inserted: 1,
                errors: 0,
            }
        });
        let summary = join_outcome("http://a.com", handle.await).unwrap();
        assert_eq!(summary.inserted, 1);
    }
}
