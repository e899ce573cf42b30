use crate::geocode::{geocode_query, parse_geocode};
use crate::types::{parse_current_weather, GeoPoint, WeatherError, WeatherSnapshot};
use async_trait::async_trait;
use meteo_core::{NetworkError, ReqwestErrorExt, WeatherConfig};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::sync::Arc;
use url::Url;

const USER_AGENT: &str = concat!("meteo/", env!("CARGO_PKG_VERSION"));

/// Snapshots are always Celsius and m/s
const UNITS: &str = "metric";

/// The two-step lookup the province workflow depends on.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Resolve a city name to coordinates.
    async fn geocode(&self, city: &str) -> Result<GeoPoint, WeatherError>;

    /// Current conditions at a coordinate.
    async fn fetch_current_weather(&self, lat: f64, lon: f64)
        -> Result<WeatherSnapshot, WeatherError>;
}

/// OpenWeather error bodies look like `{"cod": 401, "message": "Invalid API key..."}`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// HTTP client for the OpenWeather geocoding and current-weather endpoints
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Arc<Client>,
    api_key: Option<String>,
    geocode_url: Url,
    current_url: Url,
    lang: String,
    country: String,
}

impl OpenWeatherClient {
    /// Build a client from settings. A missing or placeholder API key is
    /// accepted here and reported by each lookup instead.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WeatherError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
            api_key: config.usable_api_key().map(str::to_string),
            geocode_url: parse_endpoint(&config.geocode_url, "weather.geocode_url")?,
            current_url: parse_endpoint(&config.current_url, "weather.current_url")?,
            lang: config.lang.clone(),
            country: config.country.clone(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, WeatherError> {
        self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)
    }

    /// Send a GET and return the body of a successful response
    async fn get_body(
        &self,
        context: &'static str,
        url: &Url,
        query: &[(&str, &str)],
    ) -> Result<String, WeatherError> {
        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| WeatherError::transport(context, e.into_network_error()))?;

        let response = check_response(context, response).await?;

        response
            .text()
            .await
            .map_err(|e| WeatherError::transport(context, e.into_network_error()))
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherClient {
    async fn geocode(&self, city: &str) -> Result<GeoPoint, WeatherError> {
        let key = self.api_key()?;
        let q = geocode_query(city, &self.country);
        tracing::debug!("Geocoding {:?}", q);

        let body = self
            .get_body(
                "Geocoding",
                &self.geocode_url,
                &[("q", q.as_str()), ("limit", "1"), ("appid", key)],
            )
            .await?;

        let geo = parse_geocode(city, &body)?;
        tracing::info!(
            "Geocoded {} to {} ({:.4}, {:.4})",
            city,
            geo.resolved_name,
            geo.lat,
            geo.lon
        );
        Ok(geo)
    }

    async fn fetch_current_weather(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let key = self.api_key()?;
        let lat = lat.to_string();
        let lon = lon.to_string();
        tracing::debug!("Fetching current weather at {}, {}", lat, lon);

        let body = self
            .get_body(
                "Weather",
                &self.current_url,
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("units", UNITS),
                    ("lang", self.lang.as_str()),
                    ("appid", key),
                ],
            )
            .await?;

        parse_current_weather(&body)
    }
}

fn parse_endpoint(raw: &str, field: &str) -> Result<Url, WeatherError> {
    Url::parse(raw).map_err(|e| WeatherError::Config(format!("{}: {}", field, e)))
}

/// Check response status and extract the provider's error message
async fn check_response(context: &'static str, response: Response) -> Result<Response, WeatherError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    tracing::warn!("{} request failed with status {}: {}", context, status, message);
    Err(WeatherError::transport(
        context,
        NetworkError::ServerError {
            status: status.as_u16(),
            message,
        },
    ))
}
