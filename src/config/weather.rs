use serde::{Deserialize, Serialize};

/// OpenWeatherMap client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Current-weather endpoint
    pub base_url: String,

    /// Unit system passed to the API (metric, imperial, standard)
    pub units: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Optional request timeout; none by default
    pub timeout_secs: Option<u64>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.openweathermap.org/data/2.5/weather".to_string(),
            units: "metric".to_string(),
            api_key_env: "OPENWEATHER_API_KEY".to_string(),
            timeout_secs: None,
        }
    }
}
