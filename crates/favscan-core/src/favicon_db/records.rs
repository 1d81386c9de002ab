//! Record operations: insert-if-absent and reads.

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::db::FaviconDb;
use super::types::FaviconRecord;

fn record_from_row(row: &SqliteRow) -> FaviconRecord {
    FaviconRecord {
        id: row.get("id"),
        link: row.get("link"),
        md5: row.get::<Option<String>, _>("md5").unwrap_or_default(),
        sha256: row.get::<Option<String>, _>("sha256").unwrap_or_default(),
    }
}

impl FaviconDb {
    /// Insert a record unless one with the same `link` already exists.
    ///
    /// Duplicates are ignored, not updated: the first digests stored for a
    /// link stay. Returns `true` if a row was written.
    pub async fn insert_if_absent(
        &self,
        link: &str,
        md5: &str,
        sha256: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO favicons (link, md5, sha256)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(link)
        .bind(md5)
        .bind(sha256)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Look up a record by its resolved favicon URL.
    pub async fn get_by_link(&self, link: &str) -> Result<Option<FaviconRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, link, md5, sha256
            FROM favicons
            WHERE link = ?1
            "#,
        )
        .bind(link)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(record_from_row))
    }

    /// All records, oldest first.
    pub async fn list_records(&self) -> Result<Vec<FaviconRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, link, md5, sha256
            FROM favicons
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM favicons")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}
