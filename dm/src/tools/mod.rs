//! Tool system for the documentation server
//!
//! Each tool validates its JSON arguments, then runs one query against the
//! shared [`SearchEngine`](docstore::SearchEngine) held by the `ToolContext`.
//! Tools never mutate the engine, so a context can be cloned freely across
//! concurrent requests.

mod args;
mod context;
mod error;
mod executor;
mod traits;

pub mod builtin;

pub use args::required_str;
pub use context::{ServerLabels, ToolContext};
pub use error::ToolError;
pub use executor::ToolExecutor;
pub use traits::{Tool, ToolDefinition, ToolResult};
