//! Decoding error types.

/// Errors that can occur while decoding a listing response.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An error from the underlying quick-xml reader.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// An error parsing a value from XML text content.
    #[error("failed to parse value: {0}")]
    Parse(String),

    /// An element appeared somewhere the response schema does not allow.
    #[error("unexpected XML element: {0}")]
    UnexpectedElement(String),
}
