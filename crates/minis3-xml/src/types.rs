//! Typed records decoded from listing responses.

/// The identity owning a listed object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Owner {
    /// Canonical user id.
    pub id: String,
    /// Human-readable display name.
    pub display_name: String,
}

/// One `Contents` element of a `ListBucketResult` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEntry {
    /// Object key.
    pub key: String,
    /// Last-modified timestamp, as returned by the service.
    pub last_modified: String,
    /// Entity tag (content digest).
    pub etag: String,
    /// Object size in bytes.
    pub size: u64,
    /// Storage class label.
    pub storage_class: String,
    /// Owning identity, when the service includes one.
    pub owner: Option<Owner>,
}

/// One `Bucket` element of a `ListAllMyBucketsResult` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketSummary {
    /// Bucket name.
    pub name: String,
    /// Creation timestamp, as returned by the service.
    pub creation_date: String,
}
