//! Event and WebSocket message types
//!
//! Defines the events the clock publishes to the host UI and the few
//! messages a connected client may send back.

use serde::{Deserialize, Serialize};

use crate::clock::render::ClockSnapshot;
use crate::clock::state::ClearReason;
use crate::clock::types::TimeOfDay;

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ping for keepalive
    Ping,
    /// Acknowledge a fired alarm (same effect as the dismiss endpoint)
    Dismiss,
}

/// Events published to every connected client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClockEvent {
    /// One rendered frame, emitted once per tick
    Tick {
        /// The rendered snapshot for this second
        snapshot: ClockSnapshot,
    },
    /// An alarm was armed
    AlarmArmed {
        /// Target time, `HH:MM` 24-hour
        target: String,
    },
    /// The alarm's target time matched the current tick
    AlarmFired {
        /// Target time, `HH:MM` 24-hour
        target: String,
    },
    /// The alarm was cleared
    AlarmCleared {
        /// Why it was cleared
        reason: ClearReason,
    },
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

impl ClockEvent {
    /// Per-tick snapshot event
    pub fn tick(snapshot: ClockSnapshot) -> Self {
        ClockEvent::Tick { snapshot }
    }

    /// Alarm armed for `target`
    pub fn armed(target: TimeOfDay) -> Self {
        ClockEvent::AlarmArmed {
            target: target.to_string(),
        }
    }

    /// Alarm fired at `target`
    pub fn fired(target: TimeOfDay) -> Self {
        ClockEvent::AlarmFired {
            target: target.to_string(),
        }
    }

    /// Alarm cleared for `reason`
    pub fn cleared(reason: ClearReason) -> Self {
        ClockEvent::AlarmCleared { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_deserialize_ping() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type": "ping"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn test_client_message_deserialize_dismiss() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type": "dismiss"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Dismiss));
    }

    #[test]
    fn test_event_serialize_fired() {
        let event = ClockEvent::fired(TimeOfDay::new(7, 30).unwrap());
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"alarm_fired\""));
        assert!(json.contains("\"target\":\"07:30\""));
    }

    #[test]
    fn test_event_serialize_cleared_reason() {
        let event = ClockEvent::cleared(ClearReason::Expired);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"alarm_cleared\""));
        assert!(json.contains("\"reason\":\"expired\""));
    }
}
