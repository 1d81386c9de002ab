//! Tests for favicon_db (use in-memory DB helper from db).

use crate::favicon_db::db::open_memory;
use crate::favicon_db::FaviconDb;

#[tokio::test]
async fn insert_then_read_back() {
    let db = open_memory().await.unwrap();
    assert_eq!(db.count().await.unwrap(), 0);

    let inserted = db
        .insert_if_absent("http://a.com/favicon.ico", "m1", "s1")
        .await
        .unwrap();
    assert!(inserted);

    let rec = db
        .get_by_link("http://a.com/favicon.ico")
        .await
        .unwrap()
        .expect("record exists");
    assert_eq!(rec.link, "http://a.com/favicon.ico");
    assert_eq!(rec.md5, "m1");
    assert_eq!(rec.sha256, "s1");
    assert!(db.get_by_link("http://b.com/favicon.ico").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_link_is_ignored_not_updated() {
    let db = open_memory().await.unwrap();
    assert!(db
        .insert_if_absent("http://a.com/favicon.ico", "first-md5", "first-sha")
        .await
        .unwrap());
    assert!(!db
        .insert_if_absent("http://a.com/favicon.ico", "second-md5", "second-sha")
        .await
        .unwrap());

    let records = db.list_records().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].md5, "first-md5");
    assert_eq!(records[0].sha256, "first-sha");
}

#[tokio::test]
async fn list_records_in_insert_order() {
    let db = open_memory().await.unwrap();
    for link in ["http://c.com/favicon.ico", "http://a.com/favicon.ico", "http://b.com/favicon.ico"] {
        db.insert_if_absent(link, "m", "s").await.unwrap();
    }
    let links: Vec<String> = db
        .list_records()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.link)
        .collect();
    assert_eq!(
        links,
        vec![
            "http://c.com/favicon.ico",
            "http://a.com/favicon.ico",
            "http://b.com/favicon.ico"
        ]
    );
    assert_eq!(db.count().await.unwrap(), 3);
}

#[tokio::test]
async fn ensure_schema_is_idempotent() {
    let db = open_memory().await.unwrap();
    db.insert_if_absent("http://a.com/favicon.ico", "m", "s")
        .await
        .unwrap();
    db.ensure_schema().await.unwrap();
    db.ensure_schema().await.unwrap();
    assert_eq!(db.count().await.unwrap(), 1);
}

#[tokio::test]
async fn on_disk_store_persists_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested dir").join("favicons.db");

    let db = FaviconDb::open_at(&path).await.unwrap();
    db.insert_if_absent("http://a.com/favicon.ico", "m", "s")
        .await
        .unwrap();
    db.close().await;

    let db = FaviconDb::open_at(&path).await.unwrap();
    assert!(!db
        .insert_if_absent("http://a.com/favicon.ico", "other", "other")
        .await
        .unwrap());
    let records = db.list_records().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].md5, "m");
    db.close().await;
}

#[tokio::test]
async fn insert_after_close_is_storage_error() {
    let db = open_memory().await.unwrap();
    db.close().await;
    assert!(db
        .insert_if_absent("http://a.com/favicon.ico", "m", "s")
        .await
        .is_err());
}
