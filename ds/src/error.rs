//! Error types for document queries and engine construction

use thiserror::Error;

/// Errors returned by the store and search engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Document not found: {id}. Use list_docs to see available documents.")]
    NotFound { id: String },

    #[error("Failed to build search engine: {0}")]
    Build(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_id_and_listing() {
        let err = DocError::NotFound {
            id: "guides/missing.md".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("guides/missing.md"));
        assert!(msg.contains("list_docs"));
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = DocError::InvalidArgument("query must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid argument: query must not be empty");
    }
}
