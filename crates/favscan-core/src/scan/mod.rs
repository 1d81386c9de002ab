//! Scan orchestration: page → favicon links → digests → store, per target URL.
//!
//! Failures are reported as events and never stop the run, including a
//! panicked worker for one target. Progress goes out over an mpsc channel so the
//! CLI (or a test) decides how to render it.

mod parallel;
mod target;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::checksum::DigestPair;
use crate::error::ScanError;
use crate::favicon_db::FaviconDb;
use crate::fetch::HttpOptions;

pub use parallel::run_targets_parallel;
pub use target::scan_target;

/// Progress and error notifications emitted while scanning.
#[derive(Debug)]
pub enum ScanEvent {
    /// Started processing a target URL.
    Target { url: String },
    /// Page fetched but no favicon references found.
    NoLinks { url: String },
    /// Favicon hashed and handed to the store. `inserted` is false when the
    /// link was already stored (the existing row is kept).
    Favicon {
        target: String,
        link: String,
        digests: DigestPair,
        inserted: bool,
    },
    /// Per-target or per-link failure; the scan continues.
    Error { target: String, error: ScanError },
}

/// Counters for one target or a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub targets: usize,
    pub favicons: usize,
    pub inserted: usize,
    pub errors: usize,
}

impl ScanSummary {
    pub fn absorb(&mut self, other: ScanSummary) {
        self.targets += other.targets;
        self.favicons += other.favicons;
        self.inserted += other.inserted;
        self.errors += other.errors;
    }
}

/// Scan every target. `jobs <= 1` processes targets strictly in order, one
/// network call at a time; larger values keep up to `jobs` targets in flight.
pub async fn run_scan(
    db: &FaviconDb,
    targets: Vec<String>,
    opts: &HttpOptions,
    jobs: usize,
    events: mpsc::Sender<ScanEvent>,
) -> Result<ScanSummary> {
    tracing::info!(targets = targets.len(), jobs, "starting scan");
    let summary = if jobs > 1 {
        run_targets_parallel(db, targets, opts, jobs, events).await?
    } else {
        let mut summary = ScanSummary::default();
        for url in &targets {
            summary.absorb(scan_target(db, url, opts, &events).await);
        }
        summary
    };
    tracing::info!(
        targets = summary.targets,
        favicons = summary.favicons,
        inserted = summary.inserted,
        errors = summary.errors,
        "scan finished"
    );
    Ok(summary)
}

/// Send an event; a dropped receiver only means nobody is rendering.
async fn emit(events: &mpsc::Sender<ScanEvent>, event: ScanEvent) {
    let _ = events.send(event).await;
}
