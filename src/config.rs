use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::view::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Weather station API
    pub station_base_url: String,
    pub station_timeout_seconds: u64,

    // Refresh cadences
    pub refresh_interval_seconds: u64,
    pub freshness_interval_seconds: u64,

    // Rainfall interval selector
    pub rain_interval_options: Vec<u32>,
    pub rain_interval_default: u32,

    // Regions present on the page
    pub page_regions: Vec<Region>,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Application metadata
    pub deployment: Deployment,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            station_base_url: "http://127.0.0.1:5000".to_string(),
            station_timeout_seconds: 10,
            refresh_interval_seconds: 10,
            freshness_interval_seconds: 60,
            rain_interval_options: vec![1, 3, 6, 12, 24],
            rain_interval_default: 3,
            page_regions: Region::ALL.to_vec(),
            api_host: "0.0.0.0".to_string(),
            api_port: 3000,
            deployment: Deployment::Local,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the rainfall options, the default
    /// rainfall interval or the page region list cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// `from_env` is a thin wrapper over this; tests pass a map instead.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let rain_interval_options = match lookup("RAIN_INTERVAL_OPTIONS") {
            Some(raw) => parse_interval_options(&raw)?,
            None => defaults.rain_interval_options,
        };

        let rain_interval_default = match lookup("RAIN_INTERVAL_DEFAULT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("RAIN_INTERVAL_DEFAULT", raw.clone()))?,
            None => defaults.rain_interval_default,
        };
        if !rain_interval_options.contains(&rain_interval_default) {
            return Err(ConfigError::Invalid(
                "RAIN_INTERVAL_DEFAULT",
                format!("{rain_interval_default} is not one of the selector options"),
            ));
        }

        let page_regions = match lookup("PAGE_REGIONS") {
            Some(raw) => parse_regions(&raw)?,
            None => defaults.page_regions,
        };

        Ok(Self {
            station_base_url: lookup("STATION_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.station_base_url),
            station_timeout_seconds: parsed_or(
                &lookup,
                "STATION_TIMEOUT_SECONDS",
                defaults.station_timeout_seconds,
            ),

            refresh_interval_seconds: parsed_or(
                &lookup,
                "REFRESH_INTERVAL_SECONDS",
                defaults.refresh_interval_seconds,
            ),
            freshness_interval_seconds: parsed_or(
                &lookup,
                "FRESHNESS_INTERVAL_SECONDS",
                defaults.freshness_interval_seconds,
            ),

            rain_interval_options,
            rain_interval_default,
            page_regions,

            api_host: lookup("API_HOST").unwrap_or(defaults.api_host),
            api_port: parsed_or(&lookup, "API_PORT", defaults.api_port),

            deployment: Deployment::from_str(
                &lookup("DEPLOYMENT").unwrap_or_else(|| "local".to_string()),
            ),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    #[must_use]
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds.max(1))
    }

    #[must_use]
    pub fn freshness_period(&self) -> Duration {
        Duration::from_secs(self.freshness_interval_seconds.max(1))
    }
}

fn parsed_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_interval_options(raw: &str) -> Result<Vec<u32>, ConfigError> {
    let mut options = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let hours: u32 = part
            .parse()
            .map_err(|_| ConfigError::Invalid("RAIN_INTERVAL_OPTIONS", raw.to_string()))?;
        if hours == 0 {
            return Err(ConfigError::Invalid(
                "RAIN_INTERVAL_OPTIONS",
                raw.to_string(),
            ));
        }
        if !options.contains(&hours) {
            options.push(hours);
        }
    }

    if options.is_empty() {
        return Err(ConfigError::Invalid(
            "RAIN_INTERVAL_OPTIONS",
            raw.to_string(),
        ));
    }
    Ok(options)
}

fn parse_regions(raw: &str) -> Result<Vec<Region>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|id| {
            Region::from_id(id).ok_or_else(|| ConfigError::Invalid("PAGE_REGIONS", id.to_string()))
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
