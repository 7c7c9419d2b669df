//! Response wrappers.
//!
//! Every wrapper keeps the raw transport status and headers inspectable.
//! List wrappers decode the body only on a success status; a non-success
//! response yields an empty collection rather than an error, and the
//! caller distinguishes failure from an empty listing via the wrapped
//! status.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use minis3_auth::METADATA_PREFIX;
use minis3_xml::{BucketSummary, ListEntry, decode_bucket_listing, decode_object_listing};

use crate::error::ClientError;
use crate::object::S3Object;

/// Raw response metadata and body.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status returned by the service.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl Response {
    pub(crate) fn from_http(response: http::Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    /// Whether the service reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// An object-fetch response: body bytes paired with the user metadata
/// extracted from prefixed headers.
#[derive(Debug, Clone)]
pub struct GetObjectResponse {
    /// The raw response.
    pub response: Response,
    /// The fetched object with its metadata, prefix stripped.
    pub object: S3Object,
}

impl GetObjectResponse {
    pub(crate) fn from_http(response: http::Response<Bytes>) -> Self {
        let response = Response::from_http(response);
        let metadata = response
            .headers
            .iter()
            .filter_map(|(name, value)| {
                name.as_str().strip_prefix(METADATA_PREFIX).map(|key| {
                    (key.to_owned(), value.to_str().unwrap_or("").to_owned())
                })
            })
            .collect();
        let object = S3Object::new(response.body.clone(), metadata);
        Self { response, object }
    }
}

/// A list-objects response.
#[derive(Debug, Clone)]
pub struct ListBucketResponse {
    /// The raw response.
    pub response: Response,
    /// Decoded entries, in document order. Empty when the status is not
    /// a success.
    pub entries: Vec<ListEntry>,
}

impl ListBucketResponse {
    pub(crate) fn from_http(response: http::Response<Bytes>) -> Result<Self, ClientError> {
        let response = Response::from_http(response);
        let entries = if response.is_success() {
            decode_object_listing(&response.body)?
        } else {
            Vec::new()
        };
        Ok(Self { response, entries })
    }
}

/// A list-buckets response.
#[derive(Debug, Clone)]
pub struct ListAllMyBucketsResponse {
    /// The raw response.
    pub response: Response,
    /// Decoded bucket records, in document order. Empty when the status
    /// is not a success.
    pub buckets: Vec<BucketSummary>,
}

impl ListAllMyBucketsResponse {
    pub(crate) fn from_http(response: http::Response<Bytes>) -> Result<Self, ClientError> {
        let response = Response::from_http(response);
        let buckets = if response.is_success() {
            decode_bucket_listing(&response.body)?
        } else {
            Vec::new()
        };
        Ok(Self { response, buckets })
    }
}
