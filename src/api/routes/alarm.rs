//! Alarm routes
//!
//! Endpoints for the alarm state machine.
//!
//! - POST /api/v1/alarm - Arm an alarm
//! - DELETE /api/v1/alarm - Cancel the alarm
//! - POST /api/v1/alarm/dismiss - Dismiss a fired alarm

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{AlarmActionResponse, ArmAlarmRequest, ArmAlarmResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// POST /api/v1/alarm
///
/// Arm an alarm for the given `HH:MM` target. Fails with
/// `INVALID_INPUT` for malformed times and `PAST_TIME` for targets
/// that are not strictly in the future.
pub async fn arm_alarm(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ArmAlarmRequest>,
) -> ApiResult<(StatusCode, Json<ArmAlarmResponse>)> {
    let target = state.driver.arm(&req.time).await?;

    Ok((
        StatusCode::CREATED,
        Json(ArmAlarmResponse {
            status: "armed".to_string(),
            target: target.to_string(),
        }),
    ))
}

/// DELETE /api/v1/alarm
///
/// Cancel the alarm preemptively. Idempotent: succeeds even if no
/// alarm is set.
pub async fn cancel_alarm(
    State(state): State<Arc<AppState>>,
) -> Json<AlarmActionResponse> {
    state.driver.cancel().await;

    Json(AlarmActionResponse {
        status: "ok".to_string(),
        phase: state.driver.phase().await,
    })
}

/// POST /api/v1/alarm/dismiss
///
/// Acknowledge a fired alarm. Converges on the same transition as
/// cancel; idempotent.
pub async fn dismiss_alarm(
    State(state): State<Arc<AppState>>,
) -> Json<AlarmActionResponse> {
    state.driver.dismiss().await;

    Json(AlarmActionResponse {
        status: "ok".to_string(),
        phase: state.driver.phase().await,
    })
}
