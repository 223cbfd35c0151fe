use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::station::StationSource;
use crate::station::models::{
    ChartsResponse, DataTimestampResponse, RainfallResponse, RiskResponse, SnapshotResponse,
    TrendResponse,
};

/// Stateless HTTP client for the weather station API.
///
/// Every call is a single GET; there is no retry and no caching.
pub struct StationClient {
    http_client: Client,
    base_url: String,
}

impl StationClient {
    /// # Errors
    ///
    /// Returns `AppError::StationApi` if the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.station_timeout_seconds))
            .build()
            .map_err(|e| AppError::StationApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: config.station_base_url.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and parse the body as `T`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::StationApi` on transport failure or a non-success
    /// status, and `AppError::MalformedResponse` if the body does not parse.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::StationApi(format!("Request to {path} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::StationApi(format!(
                "HTTP {} from {path}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::StationApi(format!("Failed to read body of {path}: {e}")))?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::debug!(
                error = %e,
                path,
                body_preview = %text.chars().take(500).collect::<String>(),
                "Failed to parse station response"
            );
            AppError::MalformedResponse(format!("{path}: {e}"))
        })
    }
}

impl StationSource for StationClient {
    async fn latest_snapshot(&self) -> AppResult<SnapshotResponse> {
        self.get_json("/api/ultimo").await
    }

    async fn risk_index(&self) -> AppResult<RiskResponse> {
        self.get_json("/api/rischio").await
    }

    async fn risk_trend(&self) -> AppResult<TrendResponse> {
        self.get_json("/api/rischio/trend").await
    }

    async fn charts(&self) -> AppResult<ChartsResponse> {
        self.get_json("/api/grafici").await
    }

    async fn rainfall(&self, interval_hours: u32) -> AppResult<RainfallResponse> {
        self.get_json(&format!("/api/pioggia/{interval_hours}")).await
    }

    async fn data_timestamp(&self) -> AppResult<DataTimestampResponse> {
        self.get_json("/api/meteo/data_timestamp").await
    }
}
