//! Plain-text rendering of lookup states and province lists.

use meteo_provinces::ProvinceRecord;
use meteo_services::{LookupResult, LookupState};

pub const NOT_FOUND: &str = "Provincia no encontrada";

pub fn state(state: &LookupState) -> String {
    match state {
        LookupState::Idle => String::new(),
        LookupState::Loading { .. } => "Cargando...".to_string(),
        LookupState::Success(result) => weather(result),
        LookupState::Error { message, .. } => format!("Error: {}", message),
        LookupState::NotFound { .. } => NOT_FOUND.to_string(),
    }
}

fn weather(result: &LookupResult) -> String {
    let w = &result.weather;
    let mut lines = vec![
        result.display_label.clone(),
        format!("{}ºC", w.rounded_temperature()),
    ];
    if !w.description.is_empty() {
        lines.push(w.description.clone());
    }
    if let Some(icon) = w.icon_url() {
        lines.push(icon);
    }
    lines.push(format!("Humedad: {}%", w.humidity_pct));
    lines.push(format!("Viento: {} m/s", w.wind_speed_ms));
    lines.join("\n")
}

/// One province per line: `slug  Name (capital: Capital)`.
pub fn provinces<'a>(records: impl IntoIterator<Item = &'a ProvinceRecord>) -> String {
    records
        .into_iter()
        .map(|p| format!("{:<24}{}", p.slug, p.display_label()))
        .collect::<Vec<_>>()
        .join("\n")
}
