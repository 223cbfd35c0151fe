use crate::error::AppResult;
use crate::refresh::Outcome;
use crate::station::StationSource;
use crate::station::models::ChartsResponse;
use crate::view::chart::{
    HUMIDITY_STYLE, PRESSURE_STYLE, Plot, RISK_TREND_STYLE, TEMPERATURE_STYLE, risk_trend_layout,
};
use crate::view::{DomWriter, Region};

/// Redraw the temperature, humidity and pressure charts from one
/// `/api/grafici` call. Each chart is replaced, never appended to.
///
/// # Errors
///
/// Propagates a failed or malformed fetch; no chart is touched in that case.
pub async fn refresh_environment_charts<S: StationSource>(
    source: &S,
    writer: &DomWriter,
) -> AppResult<Outcome> {
    let ChartsResponse {
        timestamps,
        temperature,
        humidity,
        pressure,
    } = source.charts().await?;

    writer.plot(
        Region::TempGraph,
        TEMPERATURE_STYLE.plot(timestamps.clone(), temperature),
    );
    writer.plot(
        Region::HumGraph,
        HUMIDITY_STYLE.plot(timestamps.clone(), humidity),
    );
    writer.plot(Region::PressGraph, PRESSURE_STYLE.plot(timestamps, pressure));

    Ok(Outcome::Rendered)
}

/// Redraw the landslide probability trend.
///
/// An absent or empty history means "no new data this cycle": the chart
/// keeps whatever it showed before.
///
/// # Errors
///
/// Propagates a failed or malformed fetch.
pub async fn refresh_risk_trend<S: StationSource>(
    source: &S,
    writer: &DomWriter,
) -> AppResult<Outcome> {
    let Some(points) = source.risk_trend().await?.filter(|p| !p.is_empty()) else {
        return Ok(Outcome::Unchanged);
    };

    let (timestamps, probabilities): (Vec<String>, Vec<f64>) = points
        .into_iter()
        .map(|p| (p.timestamp, p.probabilita))
        .unzip();

    writer.plot(
        Region::RiskTrendGraph,
        Plot {
            traces: vec![RISK_TREND_STYLE.trace(timestamps, probabilities)],
            layout: risk_trend_layout(),
        },
    );

    Ok(Outcome::Rendered)
}
