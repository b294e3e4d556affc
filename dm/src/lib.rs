//! docmcp - serve a folder of markdown as a documentation tool server
//!
//! Loads markdown files into a [`DocumentStore`], builds a fuzzy
//! [`SearchEngine`] over them once, and exposes three tools (`list_docs`,
//! `get_doc`, `search_docs`) to a client over newline-delimited JSON-RPC on
//! stdio. The same corpus can instead be baked into a standalone server
//! crate by the code generator.
//!
//! # Modules
//!
//! - [`tools`] - Tool trait, argument validation and the three builtin tools
//! - [`mcp`] - JSON-RPC message types and the stdio server loop
//! - [`loader`] - Markdown discovery from globs and directories
//! - [`codegen`] - Standalone server crate generation
//! - [`config`] - Configuration types and loading
//! - [`logging`] - Tracing subscriber setup
//! - [`cli`] - Command-line interface

use std::sync::Arc;

use eyre::{Context, Result};
use tracing::{debug, info};

pub mod cli;
pub mod codegen;
pub mod config;
pub mod loader;
pub mod logging;
pub mod mcp;
pub mod tools;

pub use docstore::{DocError, DocumentStore, PreviewMode, SearchConfig, SearchEngine};
pub use mcp::McpServer;
pub use tools::ServerLabels;

/// Build the shared engine for a corpus
pub fn build_engine<I, K, V>(documents: I, config: SearchConfig) -> Result<Arc<SearchEngine>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    debug!("build_engine: called");
    let store = DocumentStore::from_documents(documents);
    let count = store.len();
    let engine = SearchEngine::new(store, config).context("Failed to build search engine")?;
    info!("Search engine ready with {} documents", count);
    Ok(Arc::new(engine))
}

/// Build an engine for `documents` and serve it on stdin/stdout until EOF
///
/// Entry point for generated servers.
pub async fn serve_stdio<I, K, V>(labels: ServerLabels, documents: I, config: SearchConfig) -> Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    debug!(name = %labels.name, "serve_stdio: called");
    let engine = build_engine(documents, config)?;
    McpServer::new(engine, labels).serve_stdio().await
}

/// Parse the `search` section of a config from YAML
pub fn search_config_from_yaml(yaml: &str) -> Result<SearchConfig> {
    debug!("search_config_from_yaml: called");
    let config: SearchConfig = serde_yaml::from_str(yaml).context("Failed to parse search configuration")?;
    config.validate().context("Invalid search configuration")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_engine() {
        let engine = build_engine([("a.md", "alpha")], SearchConfig::default()).unwrap();
        assert_eq!(engine.get_document("a.md").unwrap(), "alpha");
    }

    #[test]
    fn test_build_engine_rejects_bad_config() {
        let config = SearchConfig {
            name_weight: 0.0,
            ..Default::default()
        };
        assert!(build_engine([("a.md", "alpha")], config).is_err());
    }

    #[test]
    fn test_search_config_from_yaml() {
        let config = search_config_from_yaml("threshold: 0.2\npreview:\n  lines: 4\n").unwrap();
        assert_eq!(config.threshold, 0.2);
        assert_eq!(config.preview, PreviewMode::Lines(4));
        assert_eq!(config.context_chars, docstore::DEFAULT_CONTEXT_CHARS);
    }

    #[test]
    fn test_search_config_from_yaml_empty_is_default() {
        assert_eq!(search_config_from_yaml("{}").unwrap(), SearchConfig::default());
    }

    #[test]
    fn test_search_config_from_yaml_invalid() {
        assert!(search_config_from_yaml("threshold: 5").is_err());
        assert!(search_config_from_yaml("threshold: [").is_err());
    }
}
