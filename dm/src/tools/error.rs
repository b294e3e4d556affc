//! Tool error types

use docstore::DocError;
use thiserror::Error;

/// Typed failures returned to the request-handling layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Document not found: {id}. Use list_docs to see available documents.")]
    NotFound { id: String },

    #[error("Tool not found: {name}")]
    UnknownTool { name: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DocError> for ToolError {
    fn from(err: DocError) -> Self {
        match err {
            DocError::InvalidArgument(msg) => Self::InvalidArgument(msg),
            DocError::NotFound { id } => Self::NotFound { id },
            DocError::Build(msg) => Self::Internal(msg),
        }
    }
}
