use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::refresh::RainSelection;
use crate::view::{Region, RegionState};

#[derive(Debug, Serialize, ToSchema)]
pub struct PageResponse {
    /// Every region present on the page, keyed by element id
    pub regions: BTreeMap<Region, RegionState>,
    pub rain_selection: RainSelection,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RainSelectionResponse {
    pub selection: RainSelection,
    /// Values the selector accepts
    pub options: Vec<u32>,
}

/// Current content of every page region
#[utoipa::path(
    get,
    path = "/api/page",
    responses(
        (status = 200, description = "Page snapshot", body = PageResponse),
    ),
    tag = "page"
)]
pub async fn get_page(State(state): State<AppState>) -> Json<PageResponse> {
    Json(PageResponse {
        regions: state.page().snapshot(),
        rain_selection: state.scheduler.rain_selection(),
    })
}

/// Current content of one region
#[utoipa::path(
    get,
    path = "/api/page/{region}",
    params(
        ("region" = String, Path, description = "Element id, e.g. tempValue"),
    ),
    responses(
        (status = 200, description = "Region content", body = RegionState),
        (status = 404, description = "Unknown region or region not on the page"),
    ),
    tag = "page"
)]
pub async fn get_region(
    State(state): State<AppState>,
    Path(region_id): Path<String>,
) -> AppResult<Json<RegionState>> {
    let region = Region::from_id(&region_id)
        .ok_or_else(|| AppError::NotFound(format!("Unknown region '{region_id}'")))?;

    state
        .page()
        .get(region)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Region '{region_id}' is not on the page")))
}

/// Select the rainfall accumulation interval
///
/// Equivalent to the user changing the interval selector: the new interval
/// applies immediately and one rainfall refresh is dispatched for it.
#[utoipa::path(
    put,
    path = "/api/rain-interval/{hours}",
    params(
        ("hours" = u32, Path, description = "Interval in hours; must be a selector option"),
    ),
    responses(
        (status = 200, description = "Selection applied", body = RainSelectionResponse),
        (status = 400, description = "Not one of the selector options"),
        (status = 404, description = "Page has no interval selector"),
    ),
    tag = "page"
)]
pub async fn put_rain_interval(
    State(state): State<AppState>,
    Path(hours): Path<u32>,
) -> AppResult<Json<RainSelectionResponse>> {
    let selection = state.scheduler.select_rain_interval(hours)?;

    Ok(Json(RainSelectionResponse {
        selection,
        options: state.scheduler.rain_control().options().to_vec(),
    }))
}
