//! Client error types.

use crate::transport::BoxError;

/// Errors surfaced while building, signing, or decoding requests.
///
/// A signature mismatch is deliberately absent: this client only produces
/// signatures and has no feedback channel to detect a rejection beyond the
/// raw response status.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The operation asked for an HTTP method this protocol does not sign.
    /// The builder never silently substitutes a method.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Query-string authentication was requested with neither an absolute
    /// expiry nor a relative expiry window configured.
    #[error("neither an absolute expiry nor an expiry window is set")]
    ExpiryNotConfigured,

    /// A metadata key does not form a valid header name.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    /// A header or metadata value is not representable on the wire.
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// Request assembly failed in the underlying HTTP types.
    #[error("HTTP error: {0}")]
    Http(#[from] http::Error),

    /// A list response body could not be decoded.
    #[error(transparent)]
    Xml(#[from] minis3_xml::XmlError),

    /// The transport collaborator failed to carry the request.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
}
