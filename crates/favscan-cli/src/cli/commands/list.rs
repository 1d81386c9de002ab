//! `favscan --list` – show stored favicon records.

use anyhow::Result;
use favscan_core::favicon_db::FaviconDb;

pub async fn run_list(db: &FaviconDb) -> Result<()> {
    let records = db.list_records().await?;
    if records.is_empty() {
        println!("No favicons in database.");
    } else {
        println!("{:<6} {:<32} {:<64} {}", "ID", "MD5", "SHA256", "LINK");
        for r in records {
            println!("{:<6} {:<32} {:<64} {}", r.id, r.md5, r.sha256, r.link);
        }
    }
    Ok(())
}
