//! `favscan --file <PATH>` – scan every URL in the list and store favicon digests.

use anyhow::Result;
use favscan_core::config::FavscanConfig;
use favscan_core::favicon_db::FaviconDb;
use favscan_core::scan::{self, ScanEvent};

/// A rendered console line and where it goes.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ConsoleLine {
    Out(String),
    Err(String),
}

/// Render one event. With `show_target` (several targets in flight) every
/// line after "Processing URL" is prefixed with its target, since lines from
/// different targets interleave.
pub(crate) fn render(event: &ScanEvent, show_target: bool) -> ConsoleLine {
    let prefix = |target: &str| {
        if show_target {
            format!("[{target}] ")
        } else {
            String::new()
        }
    };
    match event {
        ScanEvent::Target { url } => ConsoleLine::Out(format!("Processing URL: {url}")),
        ScanEvent::NoLinks { url } => {
            ConsoleLine::Out(format!("{}No favicon.ico links found.", prefix(url)))
        }
        ScanEvent::Favicon {
            target,
            link,
            digests,
            ..
        } => ConsoleLine::Out(format!(
            "{}Favicon: {} | MD5: {} | SHA256: {}",
            prefix(target),
            link,
            digests.md5,
            digests.sha256
        )),
        ScanEvent::Error { target, error } => {
            ConsoleLine::Err(format!("{}error: {error}", prefix(target)))
        }
    }
}

pub async fn run_scan_file(
    db: &FaviconDb,
    cfg: &FavscanConfig,
    targets: Vec<String>,
    jobs: usize,
) -> Result<()> {
    let show_target = jobs > 1;
    let (events_tx, mut events_rx) = tokio::sync::mpsc::channel::<ScanEvent>(16);
    let printer = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            match render(&event, show_target) {
                ConsoleLine::Out(line) => println!("{line}"),
                ConsoleLine::Err(line) => eprintln!("{line}"),
            }
        }
    });

    let summary = scan::run_scan(db, targets, &cfg.http_options(), jobs, events_tx).await?;
    printer
        .await
        .map_err(|e| anyhow::anyhow!("printer task join: {}", e))?;

    let stored = db.count().await?;
    println!(
        "Done: {} URL(s), {} favicon(s), {} new record(s), {} error(s); {} record(s) in store.",
        summary.targets, summary.favicons, summary.inserted, summary.errors, stored
    );
    Ok(())
}
