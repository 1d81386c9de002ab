//! Types used by the favicon store.

/// Row identifier.
pub type RecordId = i64;

/// One stored favicon: resolved URL plus its digests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaviconRecord {
    pub id: RecordId,
    pub link: String,
    pub md5: String,
    pub sha256: String,
}
