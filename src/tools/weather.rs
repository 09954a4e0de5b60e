use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

use super::{Tool, optional_str};
use crate::config::WeatherConfig;
use crate::context::UserContext;

const DEFAULT_CITY: &str = "New York, NY";
const FETCH_ERROR: &str = "Error fetching weather data";

/// Tool fetching current conditions from the OpenWeatherMap API
pub struct WeatherTool {
    config: WeatherConfig,
    client: reqwest::Client,
    api_key: Option<String>,
}

impl WeatherTool {
    /// Create a tool that reads its API key from the configured environment variable
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("failed to build HTTP client")?;

        Ok(Self {
            config,
            client,
            api_key: None,
        })
    }

    /// Use an explicit API key instead of the environment
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.config.api_key_env).ok())
            .filter(|key| !key.is_empty())
    }

    /// Fetch and summarize the weather for `city`; failures come back as text
    pub async fn fetch(&self, city: &str) -> String {
        let Some(api_key) = self.api_key() else {
            return missing_key_message(&self.config.api_key_env);
        };

        debug!(city, url = %self.config.base_url, "requesting current weather");

        let request = self.client.get(&self.config.base_url).query(&[
            ("q", city),
            ("appid", api_key.as_str()),
            ("units", self.config.units.as_str()),
        ]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                // the URL carries the API key
                let e = e.without_url();
                warn!(city, error = %e, "weather request failed");
                return format!("{}: {}", FETCH_ERROR, e);
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return format!("{}: {}", FETCH_ERROR, e.without_url()),
        };

        let payload: WeatherResponse = match serde_json::from_str(&body) {
            Ok(payload) => payload,
            Err(e) if status.is_success() => {
                return format!("{}: invalid response: {}", FETCH_ERROR, e);
            }
            Err(_) => return format!("{}: HTTP {}", FETCH_ERROR, status),
        };

        if payload.status_code() != Some(200) {
            let message = match payload.error_message() {
                Some(message) => message,
                None if !status.is_success() => format!("HTTP {}", status),
                None => "unknown error".to_string(),
            };
            warn!(city, %status, message = %message, "weather API returned an error");
            return format!("{}: {}", FETCH_ERROR, message);
        }

        match payload.summary(city, &self.config.units) {
            Some(summary) => summary,
            None => format!("{}: response did not include a temperature", FETCH_ERROR),
        }
    }
}

/// Message returned when no API key is configured
pub fn missing_key_message(env_var: &str) -> String {
    format!(
        "API key is not set in the environment variable '{}'.",
        env_var
    )
}

#[derive(Debug, Default, Deserialize)]
struct WeatherResponse {
    #[serde(default)]
    cod: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    weather: Vec<Condition>,
    #[serde(default)]
    main: Option<Readings>,
    #[serde(default)]
    wind: Option<Wind>,
}

#[derive(Debug, Default, Deserialize)]
struct Condition {
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Readings {
    #[serde(default)]
    temp: Option<serde_json::Number>,
    #[serde(default)]
    humidity: Option<serde_json::Number>,
}

#[derive(Debug, Default, Deserialize)]
struct Wind {
    #[serde(default)]
    speed: Option<serde_json::Number>,
}

impl WeatherResponse {
    /// `cod` arrives as 200 on success and as a string like "404" on errors
    fn status_code(&self) -> Option<i64> {
        match self.cod.as_ref()? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn error_message(&self) -> Option<String> {
        match self.message.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::String(_) | Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    fn summary(&self, city: &str, units: &str) -> Option<String> {
        let main = self.main.as_ref()?;
        let temp = main.temp.as_ref()?;

        let (temp_unit, speed_unit) = match units {
            "imperial" => ("°F", "mph"),
            "standard" => (" K", "m/s"),
            _ => ("°C", "m/s"),
        };

        let mut summary = format!("Weather in {}: {}{}", city, temp, temp_unit);
        if let Some(description) = self
            .weather
            .first()
            .and_then(|c| c.description.as_deref())
        {
            summary.push_str(&format!(", {}", description));
        }
        if let Some(humidity) = &main.humidity {
            summary.push_str(&format!(", humidity {}%", humidity));
        }
        if let Some(speed) = self.wind.as_ref().and_then(|w| w.speed.as_ref()) {
            summary.push_str(&format!(", wind {} {}", speed, speed_unit));
        }
        Some(summary)
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_current_weather"
    }

    fn description(&self) -> &str {
        "Get the current weather for a given city."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "Get the current weather for a given city.",
                    "default": DEFAULT_CITY
                }
            },
            "required": []
        })
    }

    async fn execute(&self, params: Value, _user: Option<&UserContext>) -> Result<String> {
        let city = optional_str(&params, "city").unwrap_or(DEFAULT_CITY);
        Ok(self.fetch(city).await)
    }
}
