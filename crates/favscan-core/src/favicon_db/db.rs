//! SQLite-backed favicon store: connection and schema.
//!
//! Record reads and writes live in `records`.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the favicon store. Cheap to clone; clones share one pool.
#[derive(Clone)]
pub struct FaviconDb {
    pub(crate) pool: Pool<Sqlite>,
}

impl FaviconDb {
    /// Open (or create) the store at `path` and ensure the schema exists.
    /// Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        // Concurrent scan workers share the file; wait on locks instead of failing.
        let options = SqliteConnectOptions::from_str(&uri)?.busy_timeout(Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .with_context(|| format!("open favicon store {}", path.display()))?;

        let db = FaviconDb { pool };
        db.ensure_schema().await?;
        tracing::debug!("favicon store ready at {}", path.display());
        Ok(db)
    }

    /// Create the `favicons` table if it does not exist. Safe to call on every start.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS favicons (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                link TEXT UNIQUE,
                md5 TEXT,
                sha256 TEXT
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("create favicons table")?;

        Ok(())
    }

    /// Close all connections. Further queries fail with `PoolClosed`.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
/// Open an in-memory store for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<FaviconDb> {
    // Single connection to avoid in-memory pool handing back a different empty DB.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let db = FaviconDb { pool };
    db.ensure_schema().await?;
    Ok(db)
}
