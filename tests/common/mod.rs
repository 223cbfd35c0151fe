//! Shared fixtures for integration tests.
//!
//! - `ScriptedStation`: in-process `StationSource` with per-call delays, for
//!   driving refresh tasks and the scheduler under paused tokio time.
//! - `FakeStationServer`: a real HTTP server on `127.0.0.1:0` serving canned
//!   bodies, for exercising `StationClient` end to end.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Router,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::Instant;

use stazione_dashboard::config::Config;
use stazione_dashboard::error::{AppError, AppResult};
use stazione_dashboard::station::StationSource;
use stazione_dashboard::station::models::{
    ChartsResponse, DataTimestampResponse, RainfallResponse, RiskResponse, SnapshotResponse,
    TrendPoint, TrendResponse,
};
use stazione_dashboard::view::Region;

/// One scripted answer: wait `delay`, then return `result`.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    pub delay: Duration,
    pub result: Result<T, String>,
}

impl<T> Reply<T> {
    pub fn ok(value: T) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(value),
        }
    }

    pub fn err(message: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(message.to_string()),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn resolve(self) -> AppResult<T> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.map_err(AppError::StationApi)
    }
}

/// Queue of replies; once drained, `steady` answers every call.
#[derive(Debug)]
struct Script<T> {
    queue: VecDeque<Reply<T>>,
    steady: Option<Reply<T>>,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            steady: None,
        }
    }
}

impl<T: Clone> Script<T> {
    fn next(&mut self) -> Reply<T> {
        self.queue
            .pop_front()
            .or_else(|| self.steady.clone())
            .unwrap_or_else(|| Reply::err("no scripted reply"))
    }
}

/// A recorded call: endpoint label and the (paused-clock) time it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub endpoint: String,
    pub at: Instant,
}

#[derive(Debug, Default)]
pub struct ScriptedStation {
    snapshot: Mutex<Script<SnapshotResponse>>,
    risk: Mutex<Script<RiskResponse>>,
    trend: Mutex<Script<TrendResponse>>,
    charts: Mutex<Script<ChartsResponse>>,
    rainfall: Mutex<HashMap<u32, Script<RainfallResponse>>>,
    data_timestamp: Mutex<Script<DataTimestampResponse>>,
    calls: Mutex<Vec<Call>>,
}

macro_rules! script_setters {
    ($field:ident, $push:ident, $steady:ident, $ty:ty) => {
        pub fn $push(&self, reply: Reply<$ty>) -> &Self {
            self.$field.lock().unwrap().queue.push_back(reply);
            self
        }

        pub fn $steady(&self, reply: Reply<$ty>) -> &Self {
            self.$field.lock().unwrap().steady = Some(reply);
            self
        }
    };
}

impl ScriptedStation {
    pub fn new() -> Self {
        Self::default()
    }

    script_setters!(snapshot, push_snapshot, steady_snapshot, SnapshotResponse);
    script_setters!(risk, push_risk, steady_risk, RiskResponse);
    script_setters!(trend, push_trend, steady_trend, TrendResponse);
    script_setters!(charts, push_charts, steady_charts, ChartsResponse);
    script_setters!(
        data_timestamp,
        push_data_timestamp,
        steady_data_timestamp,
        DataTimestampResponse
    );

    pub fn push_rainfall(&self, hours: u32, reply: Reply<RainfallResponse>) -> &Self {
        self.rainfall
            .lock()
            .unwrap()
            .entry(hours)
            .or_default()
            .queue
            .push_back(reply);
        self
    }

    pub fn steady_rainfall(&self, hours: u32, reply: Reply<RainfallResponse>) -> &Self {
        self.rainfall.lock().unwrap().entry(hours).or_default().steady = Some(reply);
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls to `endpoint`.
    pub fn count(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .count()
    }

    fn record(&self, endpoint: String) {
        self.calls.lock().unwrap().push(Call {
            endpoint,
            at: Instant::now(),
        });
    }
}

impl StationSource for ScriptedStation {
    async fn latest_snapshot(&self) -> AppResult<SnapshotResponse> {
        self.record("ultimo".to_string());
        let reply = self.snapshot.lock().unwrap().next();
        reply.resolve().await
    }

    async fn risk_index(&self) -> AppResult<RiskResponse> {
        self.record("rischio".to_string());
        let reply = self.risk.lock().unwrap().next();
        reply.resolve().await
    }

    async fn risk_trend(&self) -> AppResult<TrendResponse> {
        self.record("rischio/trend".to_string());
        let reply = self.trend.lock().unwrap().next();
        reply.resolve().await
    }

    async fn charts(&self) -> AppResult<ChartsResponse> {
        self.record("grafici".to_string());
        let reply = self.charts.lock().unwrap().next();
        reply.resolve().await
    }

    async fn rainfall(&self, interval_hours: u32) -> AppResult<RainfallResponse> {
        self.record(format!("pioggia/{interval_hours}"));
        let reply = self
            .rainfall
            .lock()
            .unwrap()
            .entry(interval_hours)
            .or_default()
            .next();
        reply.resolve().await
    }

    async fn data_timestamp(&self) -> AppResult<DataTimestampResponse> {
        self.record("meteo/data_timestamp".to_string());
        let reply = self.data_timestamp.lock().unwrap().next();
        reply.resolve().await
    }
}

pub fn snapshot(temperature: f64, humidity: f64, pressure: f64) -> SnapshotResponse {
    SnapshotResponse {
        temperature: Some(temperature),
        humidity: Some(humidity),
        pressure: Some(pressure),
        wind: None,
    }
}

pub fn risk(label: &str) -> RiskResponse {
    RiskResponse {
        indice: Some(label.to_string()),
        spiegazione: None,
    }
}

pub fn rain(hours: u32, millimeters: f64) -> RainfallResponse {
    RainfallResponse {
        ore: Some(hours),
        pioggia: millimeters,
    }
}

pub fn charts(len: usize) -> ChartsResponse {
    ChartsResponse {
        timestamps: (0..len).map(|i| format!("10:{i:02}:00")).collect(),
        temperature: (0..len).map(|i| 18.0 + i as f64).collect(),
        humidity: (0..len).map(|i| 50.0 + i as f64).collect(),
        pressure: (0..len).map(|i| 1010.0 + i as f64).collect(),
    }
}

pub fn trend(probabilities: &[f64]) -> TrendResponse {
    Some(
        probabilities
            .iter()
            .enumerate()
            .map(|(i, p)| TrendPoint {
                timestamp: format!("10:00:{i:02}"),
                probabilita: *p,
                classe: None,
            })
            .collect(),
    )
}

/// Config with the default cadences and only `regions` on the page.
pub fn config_with(regions: &[Region]) -> Config {
    Config {
        page_regions: regions.to_vec(),
        ..Config::default()
    }
}

/// Canned HTTP station. Bodies are looked up by request path.
#[derive(Clone, Default)]
pub struct FakeStationServer {
    routes: Arc<Mutex<HashMap<String, (StatusCode, String)>>>,
}

impl FakeStationServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, status: StatusCode, body: &str) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    pub fn json(&self, path: &str, body: serde_json::Value) -> &Self {
        self.respond(path, StatusCode::OK, &body.to_string())
    }

    /// Serve on an ephemeral port; returns the base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .fallback(serve_canned)
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }
}

async fn serve_canned(
    State(server): State<FakeStationServer>,
    uri: Uri,
) -> (StatusCode, [(&'static str, &'static str); 1], String) {
    let routes = server.routes.lock().unwrap();
    match routes.get(uri.path()) {
        Some((status, body)) => (*status, [("content-type", "application/json")], body.clone()),
        None => (
            StatusCode::NOT_FOUND,
            [("content-type", "application/json")],
            r#"{"error":"not found"}"#.to_string(),
        ),
    }
}
