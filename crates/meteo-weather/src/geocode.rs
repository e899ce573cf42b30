//! Direct geocoding: turn a city name into coordinates.
//! The provider returns an array of candidates; only the first one is used.

use crate::types::{GeoPoint, WeatherError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    name: String,
    lat: f64,
    lon: f64,
    #[allow(dead_code)]
    country: Option<String>,
    #[allow(dead_code)]
    state: Option<String>,
}

impl From<GeocodeCandidate> for GeoPoint {
    fn from(candidate: GeocodeCandidate) -> Self {
        Self {
            lat: candidate.lat,
            lon: candidate.lon,
            resolved_name: candidate.name,
        }
    }
}

/// Query string sent to the provider, e.g. "Sevilla,ES".
pub fn geocode_query(city: &str, country: &str) -> String {
    format!("{},{}", city.trim(), country)
}

/// Parse a geocoding body. An empty array means the place is unknown.
pub fn parse_geocode(city: &str, body: &str) -> Result<GeoPoint, WeatherError> {
    let candidates: Vec<GeocodeCandidate> = serde_json::from_str(body)
        .map_err(|e| WeatherError::Parse(format!("geocoding response: {}", e)))?;

    candidates
        .into_iter()
        .next()
        .map(GeoPoint::from)
        .ok_or_else(|| WeatherError::LocationNotFound(city.to_string()))
}
