//! Integration tests for OpenWeatherClient using wiremock.
//!
//! These tests verify request parameters and error mapping against a mock HTTP server.

use meteo_core::{LookupErrorKind, NetworkError, WeatherConfig};
use meteo_weather::{OpenWeatherClient, WeatherError, WeatherLookup};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEO_PATH: &str = "/geo/1.0/direct";
const WEATHER_PATH: &str = "/data/2.5/weather";

/// Helper to build a client pointing at the mock server
fn test_client(server: &MockServer, api_key: Option<&str>) -> OpenWeatherClient {
    let config = WeatherConfig {
        api_key: api_key.map(str::to_string),
        geocode_url: format!("{}{}", server.uri(), GEO_PATH),
        current_url: format!("{}{}", server.uri(), WEATHER_PATH),
        ..WeatherConfig::default()
    };
    OpenWeatherClient::new(&config).unwrap()
}

fn madrid_weather() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -3.7, "lat": 40.4},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 15.0, "humidity": 40},
        "wind": {"speed": 3.0},
        "name": "Madrid"
    })
}

#[tokio::test]
async fn test_geocode_sends_country_limit_and_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .and(query_param("q", "Sevilla,ES"))
        .and(query_param("limit", "1"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "Seville", "lat": 37.3886, "lon": -5.9823, "country": "ES"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, Some("test-key"));
    let geo = client.geocode("Sevilla").await.unwrap();

    assert_eq!(geo.resolved_name, "Seville");
    assert_eq!(geo.lat, 37.3886);
    assert_eq!(geo.lon, -5.9823);
}

#[tokio::test]
async fn test_geocode_empty_result_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, Some("test-key"));
    let err = client.geocode("Atlantis").await.unwrap_err();

    assert!(matches!(err, WeatherError::LocationNotFound(ref city) if city == "Atlantis"));
    assert_eq!(err.kind(), LookupErrorKind::NotFound);
}

#[tokio::test]
async fn test_geocode_unauthorized_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEO_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, Some("bad-key"));
    let err = client.geocode("Madrid").await.unwrap_err();

    assert_eq!(err.kind(), LookupErrorKind::Transport);
    match &err {
        WeatherError::Transport {
            context,
            source: NetworkError::ServerError { status, message },
        } => {
            assert_eq!(*context, "Geocoding");
            assert_eq!(*status, 401);
            assert!(message.contains("Invalid API key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("Geocoding error:"));
}

#[tokio::test]
async fn test_missing_key_issues_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, None);
    assert!(!client.has_api_key());

    let err = client.geocode("Madrid").await.unwrap_err();
    assert!(matches!(err, WeatherError::MissingApiKey));
    assert_eq!(err.kind(), LookupErrorKind::Config);

    let err = client.fetch_current_weather(40.4, -3.7).await.unwrap_err();
    assert!(matches!(err, WeatherError::MissingApiKey));
}

#[tokio::test]
async fn test_blank_key_counts_as_missing() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server, Some("   "));

    let err = client.geocode("Madrid").await.unwrap_err();
    assert!(matches!(err, WeatherError::MissingApiKey));
}

#[tokio::test]
async fn test_placeholder_key_counts_as_missing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, Some("YOUR_OPENWEATHER_KEY"));
    assert!(!client.has_api_key());

    let err = client.geocode("Madrid").await.unwrap_err();
    assert!(matches!(err, WeatherError::MissingApiKey));
    assert_eq!(err.kind(), LookupErrorKind::Config);
}

#[tokio::test]
async fn test_current_weather_is_always_metric() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": {"temp": 59.0, "humidity": 40},
            "wind": {"speed": 6.7},
            "weather": []
        })))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(madrid_weather()))
        .expect(1)
        .mount(&mock_server)
        .await;

    // A stale `units` entry from an older config file has no effect
    let config: WeatherConfig = serde_json::from_value(serde_json::json!({
        "api_key": "test-key",
        "geocode_url": format!("{}{}", mock_server.uri(), GEO_PATH),
        "current_url": format!("{}{}", mock_server.uri(), WEATHER_PATH),
        "units": "imperial"
    }))
    .unwrap();
    let client = OpenWeatherClient::new(&config).unwrap();

    let weather = client.fetch_current_weather(40.4, -3.7).await.unwrap();
    assert_eq!(weather.temperature_c, 15.0);
    assert_eq!(weather.wind_speed_ms, 3.0);
}

#[tokio::test]
async fn test_current_weather_sends_units_and_lang() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .and(query_param("lat", "40.4"))
        .and(query_param("lon", "-3.7"))
        .and(query_param("units", "metric"))
        .and(query_param("lang", "es"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(madrid_weather()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, Some("test-key"));
    let weather = client.fetch_current_weather(40.4, -3.7).await.unwrap();

    assert_eq!(weather.temperature_c, 15.0);
    assert_eq!(weather.rounded_temperature(), 15);
    assert_eq!(weather.humidity_pct, 40);
    assert_eq!(weather.wind_speed_ms, 3.0);
    assert_eq!(weather.description, "clear sky");
    assert_eq!(weather.icon_id.as_deref(), Some("01d"));
}

#[tokio::test]
async fn test_current_weather_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, Some("test-key"));
    let err = client.fetch_current_weather(40.4, -3.7).await.unwrap_err();

    assert_eq!(err.kind(), LookupErrorKind::Transport);
    assert!(err.to_string().contains("503"), "Error should mention status: {}", err);
    assert!(err.user_message().contains("try again later"));
}

#[tokio::test]
async fn test_current_weather_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": {"temp": "warm"}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, Some("test-key"));
    let err = client.fetch_current_weather(40.4, -3.7).await.unwrap_err();

    assert!(matches!(err, WeatherError::Parse(_)));
    assert_eq!(err.kind(), LookupErrorKind::Deserialization);
}

#[test]
fn test_invalid_endpoint_is_config_error() {
    let config = WeatherConfig {
        geocode_url: "not a url".to_string(),
        ..WeatherConfig::default()
    };
    let err = OpenWeatherClient::new(&config).unwrap_err();
    assert_eq!(err.kind(), LookupErrorKind::Config);
}
