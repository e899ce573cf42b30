use meteo_core::{LookupErrorKind, NetworkError};
use serde::{Deserialize, Serialize};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Coordinates the provider resolved for a place name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub resolved_name: String,
}

/// Current conditions at a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
    pub description: String,
    pub icon_id: Option<String>,
}

impl WeatherSnapshot {
    /// Temperature rounded half up, as displayed ("-2.5" shows as -2).
    pub fn rounded_temperature(&self) -> i64 {
        (self.temperature_c + 0.5).floor() as i64
    }

    /// URL of the 2x provider icon, when the provider sent one
    pub fn icon_url(&self) -> Option<String> {
        self.icon_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("{}/{}@2x.png", ICON_BASE_URL, id))
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Missing weather API key (set {})", meteo_core::API_KEY_ENV)]
    MissingApiKey,

    #[error("Invalid weather configuration: {0}")]
    Config(String),

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("{context} error: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: NetworkError,
    },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    pub fn transport(context: &'static str, source: NetworkError) -> Self {
        Self::Transport { context, source }
    }

    /// Which failure class this error belongs to
    pub fn kind(&self) -> LookupErrorKind {
        match self {
            WeatherError::MissingApiKey | WeatherError::Config(_) => LookupErrorKind::Config,
            WeatherError::LocationNotFound(_) => LookupErrorKind::NotFound,
            WeatherError::Transport { .. } => LookupErrorKind::Transport,
            WeatherError::Parse(_) => LookupErrorKind::Deserialization,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Transport { source, .. } => source.user_message(),
            other => other.kind().user_message(),
        }
    }
}

/// Body of `GET /data/2.5/weather`
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    main: MainBlock,
    wind: WindBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    #[serde(default)]
    description: String,
    icon: Option<String>,
}

impl From<CurrentWeatherResponse> for WeatherSnapshot {
    fn from(response: CurrentWeatherResponse) -> Self {
        let (description, icon_id) = response
            .weather
            .into_iter()
            .next()
            .map(|c| (c.description, c.icon))
            .unwrap_or_default();

        Self {
            temperature_c: response.main.temp,
            humidity_pct: response.main.humidity,
            wind_speed_ms: response.wind.speed,
            description,
            icon_id,
        }
    }
}

/// Parse a current-weather body into a snapshot
pub fn parse_current_weather(body: &str) -> Result<WeatherSnapshot, WeatherError> {
    serde_json::from_str::<CurrentWeatherResponse>(body)
        .map(WeatherSnapshot::from)
        .map_err(|e| WeatherError::Parse(format!("weather response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(temp: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_c: temp,
            humidity_pct: 40,
            wind_speed_ms: 3.0,
            description: "clear sky".into(),
            icon_id: Some("01d".into()),
        }
    }

    #[test]
    fn test_rounding_matches_display() {
        assert_eq!(snapshot(15.0).rounded_temperature(), 15);
        assert_eq!(snapshot(15.5).rounded_temperature(), 16);
        assert_eq!(snapshot(15.49).rounded_temperature(), 15);
        assert_eq!(snapshot(-2.5).rounded_temperature(), -2);
        assert_eq!(snapshot(-2.51).rounded_temperature(), -3);
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            snapshot(10.0).icon_url().as_deref(),
            Some("https://openweathermap.org/img/wn/01d@2x.png")
        );

        let mut no_icon = snapshot(10.0);
        no_icon.icon_id = None;
        assert!(no_icon.icon_url().is_none());
    }

    #[test]
    fn test_parse_full_body() {
        let body = r#"{
            "coord": {"lon": -3.7, "lat": 40.4},
            "weather": [{"id": 800, "main": "Clear", "description": "cielo claro", "icon": "01d"}],
            "main": {"temp": 15.0, "feels_like": 13.9, "humidity": 40, "pressure": 1020},
            "wind": {"speed": 3.0, "deg": 250},
            "name": "Madrid"
        }"#;

        let weather = parse_current_weather(body).unwrap();
        assert_eq!(weather.temperature_c, 15.0);
        assert_eq!(weather.humidity_pct, 40);
        assert_eq!(weather.wind_speed_ms, 3.0);
        assert_eq!(weather.description, "cielo claro");
        assert_eq!(weather.icon_id.as_deref(), Some("01d"));
    }

    #[test]
    fn test_parse_without_conditions() {
        let body = r#"{"main": {"temp": 9.2, "humidity": 81}, "wind": {"speed": 1.5}, "weather": []}"#;
        let weather = parse_current_weather(body).unwrap();
        assert_eq!(weather.description, "");
        assert!(weather.icon_id.is_none());
    }

    #[test]
    fn test_parse_shape_mismatch_is_typed_error() {
        let err = parse_current_weather(r#"{"main": {"humidity": 81}, "wind": {"speed": 1.5}}"#)
            .unwrap_err();
        assert!(matches!(err, WeatherError::Parse(_)));
        assert_eq!(err.kind(), LookupErrorKind::Deserialization);

        let err = parse_current_weather("not json").unwrap_err();
        assert!(matches!(err, WeatherError::Parse(_)));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(WeatherError::MissingApiKey.kind(), LookupErrorKind::Config);
        assert_eq!(
            WeatherError::LocationNotFound("Atlantis".into()).kind(),
            LookupErrorKind::NotFound
        );
        let transport = WeatherError::transport("Weather", NetworkError::Timeout);
        assert_eq!(transport.kind(), LookupErrorKind::Transport);
        assert_eq!(transport.to_string(), "Weather error: Request timed out");
    }

    #[test]
    fn test_missing_key_message_names_env_var() {
        assert!(WeatherError::MissingApiKey.to_string().contains("OWM_API_KEY"));
    }
}
