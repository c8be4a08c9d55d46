//! Advanced analysis handler.

use axum::{extract::State, Json};
use cohort::AdvancedAnalysis;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Recompute the advanced analysis from the persisted valid set.
///
/// Derived values are never cached; this reads the table and derives fresh
/// on every call, so it always reflects the last completed upload.
pub async fn get_analysis(
    State(state): State<AppState>,
) -> Result<Json<AdvancedAnalysis>, ApiError> {
    let store = state.store.lock().await;
    let records = store.all_patients()?;
    Ok(Json(AdvancedAnalysis::from_records(&records)))
}
