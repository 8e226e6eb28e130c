//! Hub membership statistics.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body of `GET /api/stats`.
#[derive(Debug, Serialize)]
pub struct Stats {
    /// Number of currently registered subscribers.
    pub subscribers: usize,
}

/// `GET /api/stats` — current subscriber count.
///
/// # Errors
///
/// Responds `503 Service Unavailable` if the hub is no longer running.
pub async fn get(State(state): State<AppState>) -> Result<Json<Stats>, ApiError> {
    let subscribers = state.hub.subscriber_count().await?;
    Ok(Json(Stats { subscribers }))
}
