//! Tool-server protocol over stdio
//!
//! Newline-delimited JSON-RPC 2.0: each request and each response is a single
//! line of JSON followed by `\n`. Notifications (requests without an `id`)
//! never get a response. Stdout carries only protocol traffic.

pub mod messages;
mod server;

pub use messages::{ErrorObject, Request, Response};
pub use server::{McpServer, PROTOCOL_VERSION};
