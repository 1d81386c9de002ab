//! Tracing setup for the scanner: a log file chosen by config (XDG state dir
//! by default), with stderr as the fallback when the file cannot be opened.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::FavscanConfig;

const DEFAULT_FILTER: &str = "info,favscan=debug,favscan_core=debug";

/// Where the log goes: `log_path` from config, else `$XDG_STATE_HOME/favscan/favscan.log`.
pub fn resolve_log_path(cfg: &FavscanConfig) -> Result<PathBuf> {
    if let Some(path) = &cfg.log_path {
        return Ok(path.clone());
    }
    let xdg_dirs = xdg::BaseDirectories::with_prefix("favscan")?;
    Ok(xdg_dirs.get_state_home().join("favscan").join("favscan.log"))
}

/// Filter precedence: `RUST_LOG`, then `log_filter` from config, then the built-in default.
fn filter_directive(rust_log: Option<String>, cfg: &FavscanConfig) -> String {
    rust_log
        .filter(|d| !d.trim().is_empty())
        .or_else(|| cfg.log_filter.clone())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

fn env_filter(cfg: &FavscanConfig) -> EnvFilter {
    let directive = filter_directive(std::env::var("RUST_LOG").ok(), cfg);
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log to the configured file (appending). Returns the path in use; on
/// failure the caller falls back to [`init_logging_stderr`].
pub fn init_logging(cfg: &FavscanConfig) -> Result<PathBuf> {
    let log_path = resolve_log_path(cfg)?;
    if let Some(dir) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("open {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cfg))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {}", e))?;

    tracing::info!(path = %log_path.display(), "favscan logging initialized");
    Ok(log_path)
}

/// Log to stderr only, so a bad log path never stops a scan.
pub fn init_logging_stderr(cfg: &FavscanConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(cfg))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
