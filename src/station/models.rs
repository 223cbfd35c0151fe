use serde::{Deserialize, Serialize};

/// Response from `/api/ultimo`
///
/// The station answers `{}` until it has taken its first reading, so every
/// field is optional here. Whether a snapshot is usable is decided by
/// [`SnapshotResponse::has_readings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotResponse {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    /// Wind speed in km/h. Not every station has an anemometer; can be null,
    /// a number, or a pre-formatted string.
    #[serde(default)]
    pub wind: Option<serde_json::Value>,
}

impl SnapshotResponse {
    /// True when at least one of the three core readings is present.
    #[must_use]
    pub fn has_readings(&self) -> bool {
        self.temperature.is_some() || self.humidity.is_some() || self.pressure.is_some()
    }
}

/// Response from `/api/rischio`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskResponse {
    /// Risk label ("LOW", "MEDIUM", "HIGH")
    #[serde(default)]
    pub indice: Option<String>,
    /// Human-readable explanation of the label
    #[serde(default)]
    pub spiegazione: Option<String>,
}

/// One entry of `/api/rischio/trend`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub timestamp: String,
    /// Landslide probability in percent
    pub probabilita: f64,
    #[serde(default)]
    pub classe: Option<String>,
}

/// Response from `/api/rischio/trend`; `null` and `[]` both mean "no new data".
pub type TrendResponse = Option<Vec<TrendPoint>>;

/// Response from `/api/grafici`
///
/// Deserialization fails unless every channel has exactly one value per
/// timestamp, so a value of this type is always aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawChartsResponse")]
pub struct ChartsResponse {
    pub timestamps: Vec<String>,
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
    pub pressure: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawChartsResponse {
    timestamps: Vec<String>,
    temperature: Vec<f64>,
    humidity: Vec<f64>,
    pressure: Vec<f64>,
}

impl TryFrom<RawChartsResponse> for ChartsResponse {
    type Error = String;

    fn try_from(raw: RawChartsResponse) -> Result<Self, Self::Error> {
        let n = raw.timestamps.len();
        for (name, len) in [
            ("temperature", raw.temperature.len()),
            ("humidity", raw.humidity.len()),
            ("pressure", raw.pressure.len()),
        ] {
            if len != n {
                return Err(format!(
                    "series '{name}' has {len} values for {n} timestamps"
                ));
            }
        }

        Ok(Self {
            timestamps: raw.timestamps,
            temperature: raw.temperature,
            humidity: raw.humidity,
            pressure: raw.pressure,
        })
    }
}

/// Response from `/api/pioggia/{hours}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainfallResponse {
    /// Interval the server computed the sum for (echo of the path parameter)
    #[serde(default)]
    pub ore: Option<u32>,
    /// Accumulated rainfall in millimeters
    pub pioggia: f64,
}

/// Response from `/api/meteo/data_timestamp`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTimestampResponse {
    /// Opaque upstream refresh time, e.g. "14:00"
    #[serde(default)]
    pub orario: Option<String>,
}
