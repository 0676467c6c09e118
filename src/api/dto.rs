//! Data transfer objects
//!
//! Request and response types for the API endpoints. The `GET /clock`
//! endpoint returns a [`crate::clock::ClockSnapshot`] directly.

use serde::{Deserialize, Serialize};

use crate::clock::{AlarmPhase, DisplayFormat};

/// Arm alarm request
#[derive(Debug, Deserialize)]
pub struct ArmAlarmRequest {
    /// Target time in `HH:MM` form (24-hour)
    pub time: String,
}

/// Arm alarm response
#[derive(Debug, Serialize)]
pub struct ArmAlarmResponse {
    /// Status: "armed"
    pub status: String,
    /// Accepted target (`HH:MM`, 24-hour)
    pub target: String,
}

/// Response for cancel/dismiss actions
#[derive(Debug, Serialize)]
pub struct AlarmActionResponse {
    /// Status: "ok"
    pub status: String,
    /// Alarm phase after the action
    pub phase: AlarmPhase,
}

/// Response for format toggling
#[derive(Debug, Serialize)]
pub struct FormatResponse {
    /// Status: "ok"
    pub status: String,
    /// The display format after toggling
    pub format: DisplayFormat,
}

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy" or "unhealthy"
    pub status: String,
    /// Whether the tick task is running
    pub clock: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Number of active WebSocket connections
    pub ws_connections: usize,
    /// Crate version
    pub version: String,
}
