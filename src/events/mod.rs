//! Real-time event streaming
//!
//! Publishes the clock's output stream (per-tick snapshots and alarm
//! transitions) to connected WebSocket clients.
//!
//! - [`messages`]: event and client message types
//! - [`hub`]: connection registry and fan-out
//! - [`handler`]: axum WebSocket upgrade handler

pub mod handler;
pub mod hub;
pub mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionId, EventHub, HubConfig, HubError};
pub use messages::{ClientMessage, ClockEvent};
