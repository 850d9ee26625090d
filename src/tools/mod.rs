//! External-API tools for agent capabilities.
//!
//! Every tool body maps a string argument to a string observation and never
//! fails: upstream HTTP errors, missing JSON fields, and malformed input all
//! degrade to a descriptive error string, so the agent loop can react to the
//! failure as an observation instead of aborting.
//!
//! - [`weather`] - current weather via OpenWeather
//! - [`maps`] - geocoding and driving time via Google Maps
//! - [`wiki`] - encyclopedia summaries via the Wikipedia REST API
//! - [`registry`] - tool registration and dispatch-by-name

pub mod maps;
pub mod registry;
pub mod weather;
pub mod wiki;

pub use maps::{DriveTimeTool, GeocodeTool};
pub use registry::{Tool, ToolRegistry};
pub use weather::WeatherTool;
pub use wiki::WikiSummaryTool;

use crate::types::{AppError, Result};
use crate::utils::config::ToolsConfig;
use std::sync::Arc;

/// Build the travel tool set (weather, geocoding, drive time, wiki summary)
/// from configuration.
///
/// # Errors
///
/// Missing upstream API keys are a fatal configuration error, unlike runtime
/// upstream failures which degrade to error strings.
pub fn travel_registry(config: &ToolsConfig) -> Result<ToolRegistry> {
    let weather_key = config
        .openweather_api_key
        .clone()
        .ok_or_else(|| AppError::Config("OPENWEATHER_API_KEY is not set".to_string()))?;
    let maps_key = config
        .google_maps_api_key
        .clone()
        .ok_or_else(|| AppError::Config("GOOGLE_MAPS_API_KEY is not set".to_string()))?;

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(WeatherTool::new(&config.weather_base_url, &weather_key)));
    registry.register(Arc::new(GeocodeTool::new(&config.maps_base_url, &maps_key)));
    registry.register(Arc::new(DriveTimeTool::new(&config.maps_base_url, &maps_key)));
    registry.register(Arc::new(WikiSummaryTool::new(&config.wiki_base_url)));
    Ok(registry)
}
