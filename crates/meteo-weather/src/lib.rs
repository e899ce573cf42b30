//! Weather lookups for Meteo
//!
//! Geocodes a city name and fetches current conditions from OpenWeather,
//! converting provider JSON into typed results.

pub mod geocode;
pub mod provider;
pub mod types;

pub use geocode::{geocode_query, parse_geocode};
pub use provider::{OpenWeatherClient, WeatherLookup};
pub use types::*;
