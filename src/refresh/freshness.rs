use crate::error::AppResult;
use crate::refresh::Outcome;
use crate::station::StationSource;
use crate::view::{DomWriter, Region, format};

/// Write the upstream data time into the freshness sentence.
///
/// A null or empty `orario` leaves the region as it was.
///
/// # Errors
///
/// Propagates a failed or malformed fetch.
pub async fn refresh_freshness<S: StationSource>(
    source: &S,
    writer: &DomWriter,
) -> AppResult<Outcome> {
    let response = source.data_timestamp().await?;

    match response.orario.as_deref() {
        Some(orario) if !orario.is_empty() => {
            writer.set_text(Region::MeteoUpdateTime, format::freshness_sentence(orario));
            Ok(Outcome::Rendered)
        }
        _ => Ok(Outcome::Unchanged),
    }
}
