use crate::tools::registry::Tool;
use crate::types::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Current-weather lookup against the OpenWeather API.
pub struct WeatherTool {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherTool {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Returns `"{city}: {description}, {temp}°C"`, degrading to a fixed
    /// error string on any failure.
    pub async fn lookup(&self, city: &str) -> String {
        let unavailable = format!("Weather data not available for {}.", city);
        let url = format!("{}/data/2.5/weather", self.base_url);

        let response = match self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", &self.api_key), ("units", "metric")])
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(city, status = %response.status(), "weather lookup failed");
                return unavailable;
            }
            Err(e) => {
                tracing::warn!(city, error = %e, "weather request failed");
                return unavailable;
            }
        };

        let data: Value = match response.json().await {
            Ok(data) => data,
            Err(_) => return unavailable,
        };

        match (
            data["weather"][0]["description"].as_str(),
            data["main"]["temp"].as_f64(),
        ) {
            (Some(description), Some(temp)) => format!("{}: {}, {}°C", city, description, temp),
            _ => unavailable,
        }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get current weather for a city. Returns a string like 'Paris: sunny, 25°C'."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": { "type": "string", "description": "City name" }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let city = args["city"].as_str().unwrap_or_default();
        Ok(json!(self.lookup(city).await))
    }
}
