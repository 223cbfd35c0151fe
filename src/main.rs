use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use stazione_dashboard::common::AppState;
use stazione_dashboard::config::{Config, Deployment};
use stazione_dashboard::routes;
use stazione_dashboard::station::StationClient;

// Single-threaded: refresh tasks interleave only at await points.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Fail fast, before anything is armed
    let config = Config::from_env()?;
    init_tracing(config.deployment);

    tracing::info!(
        deployment = ?config.deployment,
        station = %config.station_base_url,
        regions = ?config.page_regions,
        rain_options = ?config.rain_interval_options,
        "Starting stazione-dashboard"
    );

    let station_client = StationClient::new(&config)?;
    let state = AppState::new(config.clone(), station_client);
    state.scheduler.start();

    let app = routes::build_router(state.clone());

    let addr = config.bind_address();
    tracing::info!(address = %addr, "Serving dashboard regions");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.scheduler.shutdown();
    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Human-readable lines locally, one JSON object per line in production.
fn init_tracing(deployment: Deployment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,stazione_dashboard=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if deployment == Deployment::Prod {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Ctrl+C received, stopping refresh tasks"),
        () = terminate => tracing::info!("SIGTERM received, stopping refresh tasks"),
    }
}
