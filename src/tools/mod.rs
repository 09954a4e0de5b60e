mod calculator;
mod clock;
mod document;
mod identity;
mod output_dir;
mod registry;
mod weather;

pub use calculator::{CalculatorTool, calculate};
pub use clock::{CurrentTimeTool, format_current_time};
pub use document::{DocumentTool, GeneratedDocument, sanitize_file_name};
pub use identity::{UserIdentityTool, describe_user};
pub use output_dir::resolve_output_dir;
pub use registry::ToolRegistry;
pub use weather::{WeatherTool, missing_key_message};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::config::ToolsConfig;
use crate::context::UserContext;

/// A tool that can be called by the assistant host
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool
    fn name(&self) -> &str;

    /// A description of what this tool does
    fn description(&self) -> &str;

    /// JSON schema for the tool's parameters.
    ///
    /// The user context is supplied by the host and never appears here.
    fn schema(&self) -> Value;

    /// Execute the tool.
    ///
    /// Domain failures (missing API key, bad expression, unwritable disk) are
    /// reported through the returned text. `Err` is reserved for parameters
    /// that do not match the schema.
    async fn execute(&self, params: Value, user: Option<&UserContext>) -> Result<String>;
}

/// Build a registry holding every tool, configured from `config`
pub fn default_registry(config: &ToolsConfig) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(UserIdentityTool);
    registry.register(CurrentTimeTool);
    registry.register(CalculatorTool);
    registry.register(WeatherTool::new(config.weather.clone())?);
    registry.register(DocumentTool::new(config.documents.clone()));
    Ok(registry)
}

/// Read an optional string parameter, treating null and absence alike
fn optional_str<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(Value::as_str)
}
