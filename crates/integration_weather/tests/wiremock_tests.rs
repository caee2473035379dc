//! Integration tests for the OpenWeatherMap client using wiremock
//!
//! These tests verify the client's behavior against a mock HTTP server,
//! ensuring proper handling of various response scenarios.

use integration_weather::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
use secrecy::SecretString;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Sample `/weather` response
fn sample_current_response() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -0.1257, "lat": 51.5085 },
        "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
        "base": "stations",
        "main": {
            "temp": 7.5,
            "feels_like": 4.9,
            "temp_min": 6.1,
            "temp_max": 8.7,
            "pressure": 1009,
            "humidity": 81
        },
        "visibility": 10000,
        "wind": { "speed": 4.12, "deg": 240 },
        "clouds": { "all": 75 },
        "dt": 1_705_320_000,
        "timezone": 0,
        "id": 2_643_743,
        "name": "London",
        "cod": 200
    })
}

/// Sample `/forecast` response covering two local days
fn sample_forecast_response() -> serde_json::Value {
    serde_json::json!({
        "cod": "200",
        "message": 0,
        "cnt": 3,
        "list": [
            {
                "dt": 1_705_348_800,
                "main": { "temp": 5.0, "humidity": 80 },
                "weather": [{ "id": 500, "main": "Rain" }],
                "dt_txt": "2024-01-15 20:00:00"
            },
            {
                "dt": 1_705_359_600,
                "main": { "temp": 3.0, "humidity": 85 },
                "weather": [{ "id": 500, "main": "Rain" }],
                "dt_txt": "2024-01-15 23:00:00"
            },
            {
                "dt": 1_705_370_400,
                "main": { "temp": 2.0, "humidity": 90 },
                "weather": [{ "id": 801, "main": "Clouds" }],
                "dt_txt": "2024-01-16 02:00:00"
            }
        ],
        "city": {
            "id": 2_643_743,
            "name": "London",
            "country": "GB",
            "timezone": 3600
        }
    })
}

/// Create a test client configured to use the mock server
///
/// # Panics
///
/// Panics if the client cannot be created (should not happen in tests).
fn create_test_client(mock_server: &MockServer) -> OpenWeatherMapClient {
    let config = WeatherConfig {
        base_url: mock_server.uri(),
        api_key: Some(SecretString::from("test-key".to_string())),
        timeout_secs: 5,
        ..Default::default()
    };
    #[allow(clippy::expect_used)]
    OpenWeatherMapClient::new(config).expect("Failed to create client")
}

/// Setup a mock for the given endpoint with the given response
async fn setup_mock(mock_server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_get_current_weather_success() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/weather",
        ResponseTemplate::new(200).set_body_json(sample_current_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current("London").await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");

    let weather = result.unwrap();
    assert!((weather.temperature - 7.5).abs() < 0.01);
    assert!((weather.humidity - 81.0).abs() < 0.01);
    assert!((weather.wind_speed - 4.12).abs() < 0.01);
    assert!((weather.pressure - 1009.0).abs() < 0.01);
    assert_eq!(weather.condition.as_deref(), Some("Clouds"));
    assert_eq!(weather.location_name.as_deref(), Some("London"));
}

#[tokio::test]
async fn test_get_forecast_success() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/forecast",
        ResponseTemplate::new(200).set_body_json(sample_forecast_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_forecast("London").await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");

    let forecast = result.unwrap();
    assert_eq!(forecast.entries.len(), 3);
    assert_eq!(forecast.utc_offset_secs, 3600);
    assert_eq!(forecast.entries[0].condition, "Rain");
    assert_eq!(forecast.entries[2].condition, "Clouds");

    // 23:00 UTC is already the next day at UTC+1
    assert_eq!(
        forecast.entries[1].local_time.format("%Y-%m-%d %H:%M").to_string(),
        "2024-01-16 00:00"
    );
}

// ============================================================================
// Error handling scenarios
// ============================================================================

#[tokio::test]
async fn test_server_error_returns_service_unavailable() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/weather",
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current("London").await;

    assert!(
        matches!(result, Err(WeatherError::ServiceUnavailable(_))),
        "Expected ServiceUnavailable, got: {result:?}"
    );
}

#[tokio::test]
async fn test_rate_limit_error() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/weather",
        ResponseTemplate::new(429).set_body_string("Rate limit exceeded"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current("London").await;

    assert!(
        matches!(result, Err(WeatherError::RateLimitExceeded)),
        "Expected RateLimitExceeded, got: {result:?}"
    );
}

#[tokio::test]
async fn test_unknown_city_returns_location_not_found() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/weather",
        ResponseTemplate::new(404)
            .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current("Atlantis").await;

    assert!(
        matches!(result, Err(WeatherError::LocationNotFound(ref name)) if name == "Atlantis"),
        "Expected LocationNotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn test_rejected_key_returns_unauthorized() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/forecast",
        ResponseTemplate::new(401).set_body_string("Invalid API key"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_forecast("London").await;

    assert!(
        matches!(result, Err(WeatherError::Unauthorized)),
        "Expected Unauthorized, got: {result:?}"
    );
}

#[tokio::test]
async fn test_other_client_error_returns_request_failed() {
    let mock_server = MockServer::start().await;

    setup_mock(&mock_server, "/weather", ResponseTemplate::new(400)).await;

    let client = create_test_client(&mock_server);
    let result = client.get_current("London").await;

    assert!(
        matches!(result, Err(WeatherError::RequestFailed(ref msg)) if msg.contains("400")),
        "Expected RequestFailed, got: {result:?}"
    );
}

#[tokio::test]
async fn test_invalid_json_response() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/weather",
        ResponseTemplate::new(200).set_body_string("not valid json"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current("London").await;

    assert!(
        matches!(result, Err(WeatherError::ParseError(_))),
        "Expected ParseError, got: {result:?}"
    );
}

#[tokio::test]
async fn test_missing_main_block_is_parse_error() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/weather",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "London",
            "wind": { "speed": 3.0 }
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current("London").await;

    assert!(
        matches!(result, Err(WeatherError::ParseError(_))),
        "Expected ParseError, got: {result:?}"
    );
}

// ============================================================================
// API key scenarios
// ============================================================================

#[tokio::test]
async fn test_missing_api_key_sends_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = WeatherConfig {
        base_url: mock_server.uri(),
        api_key: None,
        ..Default::default()
    };
    let client = OpenWeatherMapClient::new(config).unwrap();
    let result = client.get_current("London").await;

    assert!(
        matches!(result, Err(WeatherError::MissingApiKey)),
        "Expected MissingApiKey, got: {result:?}"
    );
}

#[tokio::test]
async fn test_placeholder_api_key_is_rejected() {
    let mock_server = MockServer::start().await;

    let config = WeatherConfig {
        base_url: mock_server.uri(),
        api_key: Some(SecretString::from("YOUR_VALID_API_KEY_HERE".to_string())),
        ..Default::default()
    };
    let client = OpenWeatherMapClient::new(config).unwrap();
    let result = client.get_forecast("London").await;

    assert!(matches!(result, Err(WeatherError::MissingApiKey)));
}

// ============================================================================
// Query parameter verification
// ============================================================================

#[tokio::test]
async fn test_current_request_contains_correct_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "New York"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current("New York").await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn test_forecast_request_contains_correct_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_forecast("Paris").await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}
