//! Object payload + metadata pairing.

use std::collections::HashMap;

use bytes::Bytes;

/// An object body together with its user metadata.
///
/// Metadata keys are bare (no wire prefix); the request builder prepends
/// `x-amz-meta-` on upload and the response wrapper strips it on download.
///
/// `put` accepts `impl Into<S3Object>`, so plain byte payloads convert at
/// the API boundary and a prebuilt object with metadata passes through
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3Object {
    /// Raw object bytes.
    pub data: Bytes,
    /// User metadata, keyed without the wire prefix.
    pub metadata: HashMap<String, String>,
}

impl S3Object {
    /// Pair a payload with its metadata.
    pub fn new(data: impl Into<Bytes>, metadata: HashMap<String, String>) -> Self {
        Self {
            data: data.into(),
            metadata,
        }
    }
}

impl From<Bytes> for S3Object {
    fn from(data: Bytes) -> Self {
        Self {
            data,
            metadata: HashMap::new(),
        }
    }
}

impl From<Vec<u8>> for S3Object {
    fn from(data: Vec<u8>) -> Self {
        Self::from(Bytes::from(data))
    }
}

impl From<String> for S3Object {
    fn from(data: String) -> Self {
        Self::from(Bytes::from(data))
    }
}

impl From<&'static str> for S3Object {
    fn from(data: &'static str) -> Self {
        Self::from(Bytes::from_static(data.as_bytes()))
    }
}

impl From<&'static [u8]> for S3Object {
    fn from(data: &'static [u8]) -> Self {
        Self::from(Bytes::from_static(data))
    }
}
