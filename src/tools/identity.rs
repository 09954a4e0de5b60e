use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use super::Tool;
use crate::context::UserContext;

/// Tool reporting who the host says the current user is
pub struct UserIdentityTool;

/// Render the identity line: name, then id, then email, whichever are present
pub fn describe_user(user: Option<&UserContext>) -> String {
    let mut result = String::new();

    if let Some(user) = user {
        if let Some(name) = &user.name {
            result.push_str(&format!("User: {}", name));
        }
        if let Some(id) = &user.id {
            result.push_str(&format!(" (ID: {})", id));
        }
        if let Some(email) = &user.email {
            result.push_str(&format!(" (Email: {})", email));
        }
    }

    if result.is_empty() {
        result = "User: Unknown".to_string();
    }

    result
}

#[async_trait]
impl Tool for UserIdentityTool {
    fn name(&self) -> &str {
        "get_user_name_and_email_and_id"
    }

    fn description(&self) -> &str {
        "Get the user name, Email and ID from the user object."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(&self, _params: Value, user: Option<&UserContext>) -> Result<String> {
        debug!(has_user = user.is_some(), "identity lookup");
        Ok(describe_user(user))
    }
}
