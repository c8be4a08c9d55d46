//! Upload-and-analyze handler.

use axum::{body::Bytes, extract::State, Json};
use cohort::{Analyzer, SummaryStatistics};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Accept raw CSV bytes, run a full validate-and-analyze cycle, replace the
/// persisted patient table with the valid set, and return the statistics
/// payload.
///
/// Row-level defects are reported inside the payload's `data_quality`
/// section; only structural problems produce an error response.
pub async fn analyze_upload(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SummaryStatistics>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Empty upload".to_string()));
    }

    let outcome = Analyzer::new().analyze_bytes(&body, "upload.csv")?;

    // Hold the lock across the whole replace so this load settles before
    // any other request reads or writes the table.
    let mut store = state.store.lock().await;
    store.replace_all(&outcome.dataset.valid)?;

    Ok(Json(outcome.stats))
}
