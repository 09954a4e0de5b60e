use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use serde_json::{Value, json};
use std::fmt::Display;

use super::Tool;
use crate::context::UserContext;

/// Tool returning the current local date and time
pub struct CurrentTimeTool;

/// Format a timestamp as e.g. `Current Date and Time = Tuesday, March 05, 2024, 02:07:09 PM`
pub fn format_current_time<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    let current_date = now.format("%A, %B %d, %Y");
    let current_time = now.format("%I:%M:%S %p");
    format!("Current Date and Time = {}, {}", current_date, current_time)
}

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        "get_current_time"
    }

    fn description(&self) -> &str {
        "Get the current time in a more human-readable format."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(&self, _params: Value, _user: Option<&UserContext>) -> Result<String> {
        Ok(format_current_time(&Local::now()))
    }
}
