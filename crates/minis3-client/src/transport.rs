//! The transport collaborator seam.

use bytes::Bytes;

/// Boxed error type carried back from a transport.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Carries a fully signed request to the service and returns the raw
/// response.
///
/// Implementations own everything this core does not: opening TCP/TLS
/// connections, connection reuse and pooling, timeouts, and any retry
/// policy. The signing core never blocks and places no constraints on how
/// (or on which thread) a transport dispatches.
pub trait HttpTransport {
    /// Send one request and return the raw response.
    ///
    /// # Errors
    ///
    /// Returns the transport's own error for connection or protocol
    /// failures. Non-success HTTP statuses are not errors at this layer;
    /// they come back as ordinary responses.
    fn send(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>, BoxError>;
}
