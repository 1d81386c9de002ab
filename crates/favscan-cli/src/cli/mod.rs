//! CLI for the favscan favicon fingerprinting tool.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use favscan_core::config::{self, FavscanConfig};
use favscan_core::favicon_db::FaviconDb;
use favscan_core::logging;
use std::path::PathBuf;

use commands::{run_list, run_scan_file};

/// Top-level CLI: scrape pages for favicon links and record their digests.
#[derive(Debug, Parser)]
#[command(name = "favscan")]
#[command(
    about = "Scrape pages for favicon.ico links, hash each favicon (MD5 + SHA-256) and store unique results",
    long_about = None
)]
pub struct Cli {
    /// File containing a list of URLs to scrape for favicon.ico links, one per line.
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// SQLite store for favicon records (defaults to `db_path` from config.toml).
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Scan up to N URLs concurrently (defaults to `jobs` from config.toml, normally 1).
    #[arg(long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Print stored favicon records instead of scanning.
    #[arg(long, conflicts_with = "file")]
    pub list: bool,
}

/// What a parsed command line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum CliCommand {
    Scan { file: PathBuf },
    List,
    /// No input given: show usage and do nothing else.
    Usage,
}

impl Cli {
    pub fn action(&self) -> CliCommand {
        if self.list {
            return CliCommand::List;
        }
        match &self.file {
            Some(file) => CliCommand::Scan { file: file.clone() },
            None => CliCommand::Usage,
        }
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if cli.action() == CliCommand::Usage {
            return print_usage();
        }

        let cfg = config::load_or_init()?;
        // Fall back to stderr when the log file cannot be opened.
        if let Err(e) = logging::init_logging(&cfg) {
            logging::init_logging_stderr(&cfg);
            tracing::warn!("log file unavailable, logging to stderr: {:#}", e);
        }
        tracing::debug!("loaded config: {:?}", cfg);
        dispatch(cli, &cfg).await
    }
}

fn print_usage() -> Result<()> {
    Cli::command().print_help()?;
    println!();
    Ok(())
}

/// Run the parsed command against `cfg`. `--db` / `--jobs` override the config.
pub async fn dispatch(cli: Cli, cfg: &FavscanConfig) -> Result<()> {
    let db_path = cli.db.clone().unwrap_or_else(|| cfg.db_path.clone());
    let jobs = cli.jobs.unwrap_or(cfg.jobs);

    match cli.action() {
        CliCommand::Scan { file } => {
            // Read the list before touching the store so a bad path leaves no DB behind.
            let targets = favscan_core::input::read_target_urls(&file)?;
            let db = FaviconDb::open_at(&db_path).await?;
            let result = run_scan_file(&db, cfg, targets, jobs).await;
            db.close().await;
            result?;
        }
        CliCommand::List => {
            let db = FaviconDb::open_at(&db_path).await?;
            let result = run_list(&db).await;
            db.close().await;
            result?;
        }
        CliCommand::Usage => print_usage()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
