//! ToolContext - shared state handed to every tool call

use std::sync::Arc;

use docstore::SearchEngine;
use tracing::debug;

/// Human-readable labels for the server
///
/// Only used to phrase server info and tool descriptions; they never change
/// what a query returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerLabels {
    /// Server name reported to clients
    pub name: String,
    /// Optional subject, e.g. "Acme SDK"
    pub subject: Option<String>,
}

impl ServerLabels {
    pub fn new(name: impl Into<String>, subject: Option<String>) -> Self {
        Self {
            name: name.into(),
            subject: subject.filter(|s| !s.trim().is_empty()),
        }
    }

    /// "Acme SDK documentation", or just "documentation" without a subject
    pub fn documentation_phrase(&self) -> String {
        match &self.subject {
            Some(subject) => format!("{} documentation", subject),
            None => "documentation".to_string(),
        }
    }
}

/// Execution context for tools
///
/// Cheap to clone: the engine is shared behind an `Arc` and is read-only.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub engine: Arc<SearchEngine>,
    pub labels: ServerLabels,
}

impl ToolContext {
    pub fn new(engine: Arc<SearchEngine>, labels: ServerLabels) -> Self {
        debug!(name = %labels.name, "ToolContext::new: called");
        Self { engine, labels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documentation_phrase_with_subject() {
        let labels = ServerLabels::new("acme-docs", Some("Acme SDK".to_string()));
        assert_eq!(labels.documentation_phrase(), "Acme SDK documentation");
    }

    #[test]
    fn test_documentation_phrase_without_subject() {
        let labels = ServerLabels::new("docs", None);
        assert_eq!(labels.documentation_phrase(), "documentation");
    }

    #[test]
    fn test_blank_subject_dropped() {
        let labels = ServerLabels::new("docs", Some("   ".to_string()));
        assert_eq!(labels.subject, None);
    }
}
