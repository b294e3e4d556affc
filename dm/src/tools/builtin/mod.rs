//! Built-in documentation tools

mod get_doc;
mod list_docs;
mod search_docs;

pub use get_doc::GetDocTool;
pub use list_docs::ListDocsTool;
pub use search_docs::SearchDocsTool;
