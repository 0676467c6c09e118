//! Clock routes
//!
//! - GET /api/v1/clock - Current rendered snapshot
//! - POST /api/v1/clock/format - Toggle 24h/12h display

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::FormatResponse;
use crate::api::state::AppState;
use crate::clock::ClockSnapshot;

/// GET /api/v1/clock
///
/// Render the current time, date, greeting and alarm status.
pub async fn get_clock(State(state): State<Arc<AppState>>) -> Json<ClockSnapshot> {
    Json(state.driver.snapshot().await)
}

/// POST /api/v1/clock/format
///
/// Flip between 24-hour and 12-hour rendering. The stored alarm target
/// is unaffected.
pub async fn toggle_format(State(state): State<Arc<AppState>>) -> Json<FormatResponse> {
    let format = state.driver.toggle_format().await;

    Json(FormatResponse {
        status: "ok".to_string(),
        format,
    })
}
