use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identity of the user on whose behalf the host calls a tool.
///
/// The host injects this alongside the tool parameters; it is never part of a
/// tool's declared schema. Every field is optional and unknown keys are
/// ignored, so whatever mapping the host sends can be deserialized directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "scalar_as_string")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "scalar_as_string")]
    pub email: Option<String>,
}

impl UserContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.id.is_none() && self.email.is_none()
    }
}

/// Hosts send ids as numbers as often as strings.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}
