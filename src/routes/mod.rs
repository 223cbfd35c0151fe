pub mod health;
pub mod page;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        page::get_page,
        page::get_region,
        page::put_rain_interval,
    ),
    components(
        schemas(
            health::HealthResponse,
            page::PageResponse,
            page::RainSelectionResponse,
            crate::view::RegionState,
            crate::refresh::RainSelection,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "page", description = "Rendered dashboard regions and the interval selector"),
    ),
    info(
        title = "Stazione Meteo Dashboard",
        description = "Live view of the weather station dashboard regions",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/page", get(page::get_page))
        .route("/page/{region}", get(page::get_region))
        .route("/rain-interval/{hours}", put(page::put_rain_interval))
        // No route reads a body
        .layer(RequestBodyLimitLayer::new(1024));

    // Health check routes
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
