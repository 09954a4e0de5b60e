#[derive(Debug, thiserror::Error)]
pub enum ToolsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid parameters for {tool_name}: {message}")]
    InvalidParams { tool_name: String, message: String },
}

impl ToolsError {
    pub fn invalid_params(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParams {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }
}
