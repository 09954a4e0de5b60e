mod documents;
mod weather;

pub use documents::DocumentConfig;
pub use weather::WeatherConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::ToolsError;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "assistant-tools.toml";

/// Top-level tool configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Weather API settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Document generator output settings
    #[serde(default)]
    pub documents: DocumentConfig,
}

impl ToolsConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self, ToolsError> {
        toml::from_str(text).map_err(|e| ToolsError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ToolsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ToolsError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_toml(&text)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load an explicit file, or the default file if it exists, or fall back to defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ToolsError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
