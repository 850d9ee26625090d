//! Integration tests for the external-API tools with mocked upstreams
//!
//! These tests use wiremock to stand in for the weather, maps, and wiki
//! services and validate:
//! - Success-path output formatting
//! - Degraded error strings on upstream failures and missing fields
//! - Registry dispatch to configured tools

use caravel::tools::{DriveTimeTool, GeocodeTool, WeatherTool, WikiSummaryTool};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============= Weather =============

#[tokio::test]
async fn test_weather_success_formats_description_and_temp() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Stockholm"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weather": [{"description": "light rain"}],
            "main": {"temp": 12.5}
        })))
        .mount(&server)
        .await;

    let tool = WeatherTool::new(server.uri(), "test-key");
    assert_eq!(tool.lookup("Stockholm").await, "Stockholm: light rain, 12.5°C");
}

#[tokio::test]
async fn test_weather_upstream_error_degrades() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&server)
        .await;

    let tool = WeatherTool::new(server.uri(), "test-key");
    assert_eq!(
        tool.lookup("Atlantis").await,
        "Weather data not available for Atlantis."
    );
}

#[tokio::test]
async fn test_weather_missing_fields_degrade() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weather": [],
            "main": {}
        })))
        .mount(&server)
        .await;

    let tool = WeatherTool::new(server.uri(), "test-key");
    assert_eq!(
        tool.lookup("Oslo").await,
        "Weather data not available for Oslo."
    );
}

// ============= Geocoding =============

#[tokio::test]
async fn test_geocode_success_returns_lat_lng() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("address", "Gamla Stan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{
                "geometry": {"location": {"lat": 59.3251, "lng": 18.0711}}
            }]
        })))
        .mount(&server)
        .await;

    let tool = GeocodeTool::new(server.uri(), "test-key");
    assert_eq!(tool.lookup("Gamla Stan").await, "59.3251,18.0711");
}

#[tokio::test]
async fn test_geocode_empty_results_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ZERO_RESULTS",
            "results": []
        })))
        .mount(&server)
        .await;

    let tool = GeocodeTool::new(server.uri(), "test-key");
    assert_eq!(tool.lookup("nowhere at all").await, "Coordinates not found.");
}

// ============= Driving time =============

#[tokio::test]
async fn test_drive_time_converts_seconds_to_minutes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/distancematrix/json"))
        .and(query_param("mode", "driving"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rows": [{
                "elements": [{
                    "status": "OK",
                    "duration": {"text": "1 hour", "value": 3600}
                }]
            }]
        })))
        .mount(&server)
        .await;

    let tool = DriveTimeTool::new(server.uri(), "test-key");
    assert_eq!(tool.lookup("Main St 1|Old Town Square").await, "60.0");
}

#[tokio::test]
async fn test_drive_time_fractional_minutes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/distancematrix/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rows": [{"elements": [{"duration": {"value": 2712}}]}]
        })))
        .mount(&server)
        .await;

    let tool = DriveTimeTool::new(server.uri(), "test-key");
    assert_eq!(tool.lookup("A|B").await, "45.2");
}

#[tokio::test]
async fn test_drive_time_missing_duration_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/distancematrix/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rows": [{"elements": [{"status": "NOT_FOUND"}]}]
        })))
        .mount(&server)
        .await;

    let tool = DriveTimeTool::new(server.uri(), "test-key");
    assert_eq!(tool.lookup("A|B").await, "Driving time data not found.");
}

#[tokio::test]
async fn test_drive_time_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/distancematrix/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let tool = DriveTimeTool::new(server.uri(), "test-key");
    assert_eq!(tool.lookup("A|B").await, "Error fetching distance data.");
}

// ============= Wikipedia summaries =============

#[tokio::test]
async fn test_wiki_summary_truncates_to_three_sentences() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest_v1/page/summary/Gamla_Stan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Gamla Stan",
            "extract": "Gamla Stan is the old town of Stockholm. It dates back to the 13th \
                        century. The town is full of medieval alleyways. Tourists visit year round."
        })))
        .mount(&server)
        .await;

    let tool = WikiSummaryTool::new(server.uri());
    assert_eq!(
        tool.lookup("Gamla Stan").await,
        "Gamla Stan is the old town of Stockholm. It dates back to the 13th \
         century. The town is full of medieval alleyways."
    );
}

#[tokio::test]
async fn test_wiki_missing_page_degrades() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest_v1/page/summary/Nowhere_Fort"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "title": "Not found.",
            "detail": "Page or revision not found."
        })))
        .mount(&server)
        .await;

    let tool = WikiSummaryTool::new(server.uri());
    assert_eq!(
        tool.lookup("Nowhere Fort").await,
        "No Wikipedia info found for Nowhere Fort."
    );
}

// ============= Registry dispatch =============

#[tokio::test]
async fn test_registry_executes_mounted_tool_by_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weather": [{"description": "clear sky"}],
            "main": {"temp": 21.0}
        })))
        .mount(&server)
        .await;

    let mut registry = caravel::ToolRegistry::new();
    registry.register(std::sync::Arc::new(WeatherTool::new(server.uri(), "test-key")));

    let result = registry
        .execute("get_weather", json!({"city": "Paris"}))
        .await
        .unwrap();
    assert_eq!(result, json!("Paris: clear sky, 21°C"));
}
