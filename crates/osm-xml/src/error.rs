//! Error types for the XML crate.

/// Errors that can occur while reading or writing XML.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum XmlError {
    /// The input was not well-formed XML.
    #[error("malformed xml: {0}")]
    Parse(String),

    /// A closing tag did not match the open element.
    #[error("mismatched closing tag: expected </{expected}>, got </{actual}>")]
    MismatchedTag { expected: String, actual: String },

    /// The input ended with elements still open.
    #[error("unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    /// The document contained no root element.
    #[error("document has no root element")]
    NoRoot,

    /// Writing the serialized form failed.
    #[error("write error: {0}")]
    Write(String),
}

/// Convenience alias for XML results.
pub type XmlResult<T> = Result<T, XmlError>;
