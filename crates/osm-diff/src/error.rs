//! Error types for the way diff crate.

use osm_xml::XmlError;

/// Errors that can occur while editing a way or building its change.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A node argument was neither a numeric id nor a node.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The backing document does not contain a `<way>` element.
    #[error("document contains no <way> element")]
    MissingWay,

    /// The change document has no `<way>` under the expected section.
    #[error("no <way> element under <{section}> in change document")]
    WayNotFound { section: String },

    /// A change document was requested for a way with no pending action.
    #[error("way has no pending changes")]
    Unmodified,

    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Parsing or serializing XML failed.
    #[error("xml error: {0}")]
    Xml(#[from] XmlError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
