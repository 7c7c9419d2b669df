//! Streaming XML decoding of S3 listing responses.
//!
//! The service returns list responses as XML documents; this crate turns
//! them into ordered collections of typed records without materializing a
//! document tree. Each decoder is an explicit state machine driven by the
//! element open/close/text events of a [`quick_xml::Reader`]: records are
//! built incrementally while their element is open and appended to the
//! output in document order when it closes.
//!
//! # Decoded shapes
//!
//! - `ListBucketResult` documents: `Contents` elements (Key, LastModified,
//!   ETag, Size, StorageClass, nested Owner{ID, DisplayName}) via
//!   [`decode_object_listing`]
//! - `ListAllMyBucketsResult` documents: `Bucket` elements (Name,
//!   CreationDate) via [`decode_bucket_listing`]
//!
//! Unknown elements are ignored for forward compatibility with additional
//! response fields. Malformed XML propagates as an [`XmlError`].

pub mod decode;
pub mod error;
pub mod types;

pub use decode::{decode_bucket_listing, decode_object_listing};
pub use error::XmlError;
pub use types::{BucketSummary, ListEntry, Owner};
