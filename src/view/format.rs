//! Display formatting for readings and risk labels. Pure functions only.

/// Shown in place of a missing value.
pub const PLACEHOLDER: &str = "--";

/// Risk label used when the station does not report one.
pub const DEFAULT_RISK_LABEL: &str = "low";

pub const TEMPERATURE_UNIT: &str = "°C";
pub const HUMIDITY_UNIT: &str = "%";
pub const PRESSURE_UNIT: &str = "hPa";
pub const WIND_UNIT: &str = "km/h";
pub const RAINFALL_UNIT: &str = "mm";

const FRESHNESS_PREFIX: &str = "Dati meteo (pressione e pioggia) aggiornati alle: ";

/// `18.2` + `°C` -> `"18.2 °C"`, missing -> `"-- °C"`.
#[must_use]
pub fn reading(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v} {unit}"),
        _ => format!("{PLACEHOLDER} {unit}"),
    }
}

/// Wind arrives as a number, a numeric string, or not at all.
#[must_use]
pub fn wind(value: Option<&serde_json::Value>) -> String {
    let speed = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    reading(speed, WIND_UNIT)
}

/// One decimal place and the `mm` suffix.
#[must_use]
pub fn rainfall(millimeters: f64) -> String {
    format!("{millimeters:.1} {RAINFALL_UNIT}")
}

/// Substitute the default label for a missing or blank one.
#[must_use]
pub fn risk_label(label: Option<&str>) -> &str {
    match label {
        Some(l) if !l.trim().is_empty() => l,
        _ => DEFAULT_RISK_LABEL,
    }
}

#[must_use]
pub fn badge_text(label: &str) -> String {
    label.to_uppercase()
}

#[must_use]
pub fn badge_class(label: &str) -> String {
    format!("risk {}", label.to_lowercase())
}

#[must_use]
pub fn freshness_sentence(orario: &str) -> String {
    format!("{FRESHNESS_PREFIX}{orario}")
}
