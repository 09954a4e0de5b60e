use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::Tool;
use crate::context::UserContext;
use crate::error::ToolsError;

/// Registry for tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Get all tools, ordered by name
    pub fn all(&self) -> Vec<&dyn Tool> {
        let mut tools: Vec<&dyn Tool> = self.tools.values().map(|t| t.as_ref()).collect();
        tools.sort_by(|a, b| a.name().cmp(b.name()));
        tools
    }

    /// Get tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Call a tool by name, propagating lookup and parameter errors
    pub async fn call(
        &self,
        name: &str,
        params: Value,
        user: Option<&UserContext>,
    ) -> Result<String, ToolsError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolsError::UnknownTool(name.to_string()))?;

        debug!(tool = name, has_user = user.is_some(), "invoking tool");
        tool.execute(params, user)
            .await
            .map_err(|e| ToolsError::invalid_params(name, format!("{:#}", e)))
    }

    /// Call a tool by name and always produce text for the host.
    ///
    /// Lookup and parameter errors are rendered as their message.
    pub async fn invoke(&self, name: &str, params: Value, user: Option<&UserContext>) -> String {
        match self.call(name, params, user).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = name, error = %e, "tool call rejected");
                e.to_string()
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
