use crate::error::{AppError, AppResult};
use crate::refresh::Outcome;
use crate::station::StationSource;
use crate::station::models::{RiskResponse, SnapshotResponse};
use crate::view::{DomWriter, Region, format};

/// Fetch the latest snapshot, then the risk index, and render both together.
///
/// Nothing is rendered unless both calls succeed: a failed risk fetch leaves
/// the previous card on screen, even though the snapshot was fine.
///
/// # Errors
///
/// Propagates the first failing call. A snapshot carrying none of the core
/// readings counts as malformed.
pub async fn refresh_last_values<S: StationSource>(
    source: &S,
    writer: &DomWriter,
) -> AppResult<Outcome> {
    let snapshot = source.latest_snapshot().await?;
    if !snapshot.has_readings() {
        return Err(AppError::MalformedResponse(
            "/api/ultimo: no temperature, humidity or pressure".to_string(),
        ));
    }

    let risk = source.risk_index().await?;

    render_last_values(writer, &snapshot, &risk);
    Ok(Outcome::Rendered)
}

/// Badge-only variant for pages without value cards.
///
/// # Errors
///
/// Propagates a failed risk fetch.
pub async fn refresh_risk_badge<S: StationSource>(
    source: &S,
    writer: &DomWriter,
) -> AppResult<Outcome> {
    let risk = source.risk_index().await?;
    render_risk(writer, &risk);
    Ok(Outcome::Rendered)
}

pub fn render_last_values(writer: &DomWriter, snapshot: &SnapshotResponse, risk: &RiskResponse) {
    writer.set_text(
        Region::TempValue,
        format::reading(snapshot.temperature, format::TEMPERATURE_UNIT),
    );
    writer.set_text(
        Region::HumValue,
        format::reading(snapshot.humidity, format::HUMIDITY_UNIT),
    );
    writer.set_text(
        Region::PressValue,
        format::reading(snapshot.pressure, format::PRESSURE_UNIT),
    );
    writer.set_text(Region::WindValue, format::wind(snapshot.wind.as_ref()));

    render_risk(writer, risk);
}

fn render_risk(writer: &DomWriter, risk: &RiskResponse) {
    writer.set_risk_badge(risk.indice.as_deref());

    if let Some(explanation) = risk.spiegazione.as_deref()
        && !explanation.is_empty()
    {
        writer.set_text(Region::RiskExplanation, explanation);
    }
}
