//! JSON-lines bridge between an assistant host and the tool registry.
//!
//! Each input line is a request such as
//! `{"tool": "calculator", "params": {"equation": "2+2"}, "__user__": {"name": "Ada"}}`
//! and produces exactly one response line `{"tool": "calculator", "result": "2+2 = 4"}`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::context::UserContext;
use crate::tools::ToolRegistry;

#[derive(Debug, Clone, Deserialize)]
pub struct ToolRequest {
    pub tool: String,

    #[serde(default)]
    pub params: Value,

    /// Host-injected identity, outside the tool's parameters
    #[serde(default, rename = "__user__", alias = "user")]
    pub user: Option<UserContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Echo of the requested tool; absent when the request could not be parsed
    pub tool: Option<String>,
    pub result: String,
}

/// Answer one request line
pub async fn handle_line(registry: &ToolRegistry, line: &str) -> ToolResponse {
    let request: ToolRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "malformed tool request");
            return ToolResponse {
                tool: None,
                result: format!("invalid request: {}", e),
            };
        }
    };

    let result = registry
        .invoke(&request.tool, request.params, request.user.as_ref())
        .await;

    ToolResponse {
        tool: Some(request.tool),
        result,
    }
}

/// Serve requests from `reader` until EOF, writing one response line per request.
///
/// Lines are decoded lossily so a stray invalid UTF-8 byte only affects its own request.
pub async fn serve<R, W>(registry: &ToolRegistry, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(registry, line.trim_end_matches(['\n', '\r'])).await;
        debug!(tool = ?response.tool, "answered request");

        let mut encoded = serde_json::to_string(&response)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
    }
}
