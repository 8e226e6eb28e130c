//! Request handlers.
//!
//! - `GET /`          — Server-Sent Events stream of hub messages
//! - `GET /api/stats` — JSON snapshot of hub membership

pub mod sse;
pub mod stats;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

/// Routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new().route("/stats", get(stats::get))
}
