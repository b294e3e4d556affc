//! DocStore - in-memory documentation corpus with fuzzy search
//!
//! Holds a fixed set of `(id, content)` documents and answers three queries
//! over them: list every document with a short preview, fetch one document
//! by exact id, and fuzzy-search across ids and content with highlighted
//! context around each hit.
//!
//! # Architecture
//!
//! ```text
//! DocumentStore  (id -> content, insertion ordered, immutable)
//!      │
//!      ▼
//! SearchEngine   (folded match index built once at construction)
//!      ├── list_documents()
//!      ├── get_document(id)
//!      └── search_documents(query)
//! ```
//!
//! The index is never updated in place. A different corpus means a new
//! store and a new engine.
//!
//! # Example
//!
//! ```
//! use docstore::{DocumentStore, SearchConfig, SearchEngine};
//!
//! let store = DocumentStore::from_documents([("guide.md", "Run the installation script")]);
//! let engine = SearchEngine::new(store, SearchConfig::default()).unwrap();
//! let text = engine.search_documents("instalation").unwrap();
//! assert!(text.contains("guide.md"));
//! ```

mod config;
mod engine;
mod error;
mod fold;
mod fuzzy;
mod preview;
mod store;

pub use config::{PreviewMode, SearchConfig};
pub use engine::{Field, MatchSpan, SearchEngine, SearchHit};
pub use error::DocError;
pub use store::{Document, DocumentStore};

/// Default similarity threshold (fraction of the query length allowed as edits)
pub const DEFAULT_THRESHOLD: f64 = 0.25;

/// Default weight of the content field
pub const DEFAULT_CONTENT_WEIGHT: f64 = 1.0;

/// Default weight of the id/name field
pub const DEFAULT_NAME_WEIGHT: f64 = 0.5;

/// Default characters of context shown on each side of a match
pub const DEFAULT_CONTEXT_CHARS: usize = 40;

/// Default listing preview length in characters
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

/// Marker used where a preview was truncated
pub const ELLIPSIS: &str = "...";
