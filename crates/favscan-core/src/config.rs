use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::HttpOptions;

/// Global configuration loaded from `~/.config/favscan/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavscanConfig {
    /// Connect timeout for every GET, in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout for every GET, in seconds.
    pub timeout_secs: u64,
    /// Maximum number of redirects followed per request.
    pub max_redirects: u32,
    /// SQLite file for favicon records, relative to the working directory unless absolute.
    pub db_path: PathBuf,
    /// Number of target URLs scanned concurrently (1 = strictly sequential).
    #[serde(default = "default_jobs")]
    pub jobs: usize,
    /// Log file; unset means `$XDG_STATE_HOME/favscan/favscan.log`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

fn default_jobs() -> usize {
    1
}

impl Default for FavscanConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
            max_redirects: 10,
            db_path: PathBuf::from("favicons.db"),
            jobs: default_jobs(),
            log_path: None,
            log_filter: None,
        }
    }
}

impl FavscanConfig {
    /// Network settings shared by the page fetcher and the digest calculator.
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            max_redirects: self.max_redirects,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("favscan")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FavscanConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FavscanConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FavscanConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
