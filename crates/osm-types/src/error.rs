use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid node reference: {0:?}")]
    InvalidNodeRef(String),

    #[error("unknown action: {0:?}")]
    UnknownAction(String),
}
