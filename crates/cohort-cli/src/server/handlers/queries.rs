//! Query catalogue handler.

use axum::{extract::State, Json};
use cohort::query::QueryResults;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Run the five fixed aggregation queries against the persisted table.
/// Empty results are valid output for an empty table, not an error.
pub async fn get_queries(State(state): State<AppState>) -> Result<Json<QueryResults>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.run_all_queries()?))
}
