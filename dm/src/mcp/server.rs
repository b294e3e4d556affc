//! McpServer - request dispatch and the line-oriented read loop

use std::sync::Arc;

use docstore::SearchEngine;
use eyre::{Context, Result};
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use super::messages::{
    CallToolParams, ErrorObject, INVALID_PARAMS, INVALID_REQUEST, InitializeParams, METHOD_INITIALIZE, METHOD_NOT_FOUND,
    METHOD_PING, METHOD_TOOLS_CALL, METHOD_TOOLS_LIST, PARSE_ERROR, Request, Response,
};
use crate::tools::{ServerLabels, ToolContext, ToolExecutor};

/// Protocol revision announced when the client asks for one we do not know
pub const PROTOCOL_VERSION: &str = "2025-06-18";

const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

/// Default maximum request line size (4MB)
pub const MAX_MESSAGE_SIZE: usize = 4 * 1024 * 1024;

/// Serves the documentation tools to a single client
pub struct McpServer {
    executor: ToolExecutor,
    ctx: ToolContext,
    max_message_size: usize,
}

impl McpServer {
    /// Create a server exposing the standard documentation tools
    pub fn new(engine: Arc<SearchEngine>, labels: ServerLabels) -> Self {
        debug!(name = %labels.name, "McpServer::new: called");
        Self::with_executor(ToolExecutor::standard(), ToolContext::new(engine, labels))
    }

    pub fn with_executor(executor: ToolExecutor, ctx: ToolContext) -> Self {
        Self {
            executor,
            ctx,
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }

    /// Reject request lines longer than `bytes`
    pub fn with_max_message_size(mut self, bytes: usize) -> Self {
        self.max_message_size = bytes;
        self
    }

    /// Handle one raw request line, returning the response to send (if any)
    pub async fn handle_line(&self, line: &str) -> Option<Response> {
        debug!(bytes = line.len(), "McpServer::handle_line: called");
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                debug!(%e, "McpServer::handle_line: parse error");
                return Some(Response::failure(
                    Value::Null,
                    ErrorObject::new(PARSE_ERROR, format!("Parse error: {}", e)),
                ));
            }
        };

        if value.is_array() {
            return Some(Response::failure(
                Value::Null,
                ErrorObject::new(INVALID_REQUEST, "Batch requests are not supported"),
            ));
        }

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: Request = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                debug!(%e, "McpServer::handle_line: not a request object");
                return Some(Response::failure(
                    id,
                    ErrorObject::new(INVALID_REQUEST, format!("Invalid request: {}", e)),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(Response::failure(
                id,
                ErrorObject::new(INVALID_REQUEST, "Invalid request: jsonrpc must be \"2.0\""),
            ));
        }

        self.handle_request(request).await
    }

    /// Dispatch a parsed request; notifications produce no response
    pub async fn handle_request(&self, request: Request) -> Option<Response> {
        debug!(method = %request.method, "McpServer::handle_request: called");
        if request.is_notification() {
            debug!(method = %request.method, "McpServer::handle_request: notification, no response");
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        let outcome = match request.method.as_str() {
            METHOD_INITIALIZE => self.initialize(request.params),
            METHOD_PING => Ok(json!({})),
            METHOD_TOOLS_LIST => Ok(self.list_tools()),
            METHOD_TOOLS_CALL => self.call_tool(request.params).await,
            other => {
                debug!(%other, "McpServer::handle_request: unknown method");
                Err(ErrorObject::new(METHOD_NOT_FOUND, format!("Method not found: {}", other)))
            }
        };

        Some(match outcome {
            Ok(result) => Response::success(id, result),
            Err(error) => Response::failure(id, error),
        })
    }

    fn initialize(&self, params: Value) -> Result<Value, ErrorObject> {
        debug!("McpServer::initialize: called");
        let requested = if params.is_null() {
            None
        } else {
            serde_json::from_value::<InitializeParams>(params)
                .map_err(|e| ErrorObject::new(INVALID_PARAMS, format!("Invalid initialize params: {}", e)))?
                .protocol_version
        };

        let version = requested
            .as_deref()
            .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
            .unwrap_or(PROTOCOL_VERSION);
        info!(client_version = ?requested, %version, "Client initialized");

        let labels = &self.ctx.labels;
        Ok(json!({
            "protocolVersion": version,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": labels.name,
                "version": env!("CARGO_PKG_VERSION")
            },
            "instructions": format!(
                "Use list_docs to discover {} files, get_doc to read one in full, \
                and search_docs to find text across all of them.",
                labels.documentation_phrase()
            )
        }))
    }

    fn list_tools(&self) -> Value {
        debug!("McpServer::list_tools: called");
        json!({ "tools": self.executor.definitions(&self.ctx.labels) })
    }

    async fn call_tool(&self, params: Value) -> Result<Value, ErrorObject> {
        let params: CallToolParams = serde_json::from_value(params)
            .map_err(|e| ErrorObject::new(INVALID_PARAMS, format!("Invalid tools/call params: {}", e)))?;
        debug!(tool = %params.name, "McpServer::call_tool: called");

        match self.executor.execute(&params.name, params.arguments, &self.ctx).await {
            Ok(result) => Ok(json!({
                "content": [{ "type": "text", "text": result.content }],
                "isError": false
            })),
            Err(err) => {
                warn!(tool = %params.name, error = %err, "Tool call failed");
                Err(ErrorObject::from(&err))
            }
        }
    }

    /// Read requests line by line until EOF, writing one response line per request
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(name = %self.ctx.labels.name, "Server listening");
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .context("Failed to read request")?;
            if read == 0 {
                break;
            }

            let response = if buf.len() > self.max_message_size {
                warn!(bytes = buf.len(), "Request too large");
                Some(Response::failure(
                    Value::Null,
                    ErrorObject::new(INVALID_REQUEST, format!("Message too large: {} bytes", buf.len())),
                ))
            } else {
                match std::str::from_utf8(&buf) {
                    Ok(line) if line.trim().is_empty() => continue,
                    Ok(line) => self.handle_line(line.trim()).await,
                    Err(e) => {
                        warn!(%e, "Request is not valid UTF-8");
                        Some(Response::failure(
                            Value::Null,
                            ErrorObject::new(PARSE_ERROR, format!("Parse error: invalid UTF-8: {}", e)),
                        ))
                    }
                }
            };

            if let Some(response) = response {
                send_response(&mut writer, &response).await?;
            }
        }

        info!("Input closed, server stopping");
        Ok(())
    }

    /// Serve on the process's stdin and stdout
    pub async fn serve_stdio(&self) -> Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
    }
}

/// Send a response on the stream
async fn send_response<W: AsyncWrite + Unpin>(writer: &mut W, response: &Response) -> Result<()> {
    let response_json = serde_json::to_string(response).context("Failed to serialize response")?;
    writer
        .write_all(response_json.as_bytes())
        .await
        .context("Failed to write response")?;
    writer.write_all(b"\n").await.context("Failed to write newline")?;
    writer.flush().await.context("Failed to flush response")?;
    debug!(id = %response.id, "send_response: sent response");
    Ok(())
}
