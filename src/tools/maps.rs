use crate::tools::registry::Tool;
use crate::types::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Address-to-coordinates lookup against the Google Maps Geocoding API.
pub struct GeocodeTool {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeocodeTool {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Returns `"lat,lng"` or the literal `"Coordinates not found."`.
    pub async fn lookup(&self, address: &str) -> String {
        const NOT_FOUND: &str = "Coordinates not found.";
        let url = format!("{}/maps/api/geocode/json", self.base_url);

        let response = match self
            .client
            .get(&url)
            .query(&[("address", address), ("key", &self.api_key)])
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            _ => return NOT_FOUND.to_string(),
        };

        let data: Value = match response.json().await {
            Ok(data) => data,
            Err(_) => return NOT_FOUND.to_string(),
        };

        let location = &data["results"][0]["geometry"]["location"];
        match (location["lat"].as_f64(), location["lng"].as_f64()) {
            (Some(lat), Some(lng)) => format!("{},{}", lat, lng),
            _ => NOT_FOUND.to_string(),
        }
    }
}

#[async_trait]
impl Tool for GeocodeTool {
    fn name(&self) -> &str {
        "get_coordinates"
    }

    fn description(&self) -> &str {
        "Get latitude and longitude for an address. Returns 'lat,lng' or 'Coordinates not found.'"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "address": { "type": "string", "description": "Street address or place name" }
            },
            "required": ["address"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let address = args["address"].as_str().unwrap_or_default();
        Ok(json!(self.lookup(address).await))
    }
}

/// Pairwise driving-time lookup against the Google Maps Distance Matrix API.
///
/// Input is a single string `"start_address|dest_address"`, matching the
/// argument shape the model is prompted with.
pub struct DriveTimeTool {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DriveTimeTool {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Returns driving minutes with one decimal (3600 seconds -> "60.0"), or
    /// a descriptive error string.
    pub async fn lookup(&self, addresses: &str) -> String {
        let (start, dest) = match addresses.split_once('|') {
            Some((start, dest)) if !start.trim().is_empty() && !dest.trim().is_empty() => {
                (start.trim(), dest.trim())
            }
            _ => {
                return "Invalid input format, expected 'start_address|dest_address'.".to_string()
            }
        };

        let url = format!("{}/maps/api/distancematrix/json", self.base_url);
        let response = match self
            .client
            .get(&url)
            .query(&[
                ("origins", start),
                ("destinations", dest),
                ("mode", "driving"),
                ("key", &self.api_key),
            ])
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            _ => return "Error fetching distance data.".to_string(),
        };

        let data: Value = match response.json().await {
            Ok(data) => data,
            Err(_) => return "Error fetching distance data.".to_string(),
        };

        match data["rows"][0]["elements"][0]["duration"]["value"].as_f64() {
            Some(seconds) => format!("{:.1}", seconds / 60.0),
            None => "Driving time data not found.".to_string(),
        }
    }
}

#[async_trait]
impl Tool for DriveTimeTool {
    fn name(&self) -> &str {
        "get_drive_time_minutes"
    }

    fn description(&self) -> &str {
        "Get driving time in minutes between two addresses. \
         Input format: 'start_address|dest_address'. Returns minutes like '45.2' or an error message."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "addresses": {
                    "type": "string",
                    "description": "Two addresses separated by a pipe: 'start_address|dest_address'"
                }
            },
            "required": ["addresses"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let addresses = args["addresses"].as_str().unwrap_or_default();
        Ok(json!(self.lookup(addresses).await))
    }
}
