pub mod client;
pub mod models;

use std::future::Future;

pub use client::StationClient;

use crate::error::AppResult;
use models::{
    ChartsResponse, DataTimestampResponse, RainfallResponse, RiskResponse, SnapshotResponse,
    TrendResponse,
};

/// The six endpoints the dashboard reads from.
///
/// [`StationClient`] is the HTTP implementation; the refresh tasks are
/// generic over this trait so they can be driven by an in-process fake.
pub trait StationSource: Send + Sync + 'static {
    /// `/api/ultimo`
    fn latest_snapshot(&self) -> impl Future<Output = AppResult<SnapshotResponse>> + Send;

    /// `/api/rischio`
    fn risk_index(&self) -> impl Future<Output = AppResult<RiskResponse>> + Send;

    /// `/api/rischio/trend`
    fn risk_trend(&self) -> impl Future<Output = AppResult<TrendResponse>> + Send;

    /// `/api/grafici`
    fn charts(&self) -> impl Future<Output = AppResult<ChartsResponse>> + Send;

    /// `/api/pioggia/{interval_hours}`
    fn rainfall(&self, interval_hours: u32)
    -> impl Future<Output = AppResult<RainfallResponse>> + Send;

    /// `/api/meteo/data_timestamp`
    fn data_timestamp(&self) -> impl Future<Output = AppResult<DataTimestampResponse>> + Send;
}
