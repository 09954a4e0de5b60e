pub mod config;
pub mod context;
pub mod docx;
pub mod error;
pub mod expr;
pub mod host;
pub mod tools;

pub use config::{DocumentConfig, ToolsConfig, WeatherConfig};
pub use context::UserContext;
pub use error::ToolsError;
pub use host::{ToolRequest, ToolResponse};
pub use tools::{
    CalculatorTool, CurrentTimeTool, DocumentTool, Tool, ToolRegistry, UserIdentityTool,
    WeatherTool, default_registry,
};
