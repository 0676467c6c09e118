//! # Sundial
//!
//! Interactive wall-clock and alarm engine. Sundial renders the current
//! time, date and a time-of-day greeting once per second and drives a
//! one-shot alarm state machine (UNARMED → ARMED → FIRED → UNARMED),
//! publishing every transition to connected UIs.
//!
//! ## Features
//!
//! - **Deterministic core**: the state machine takes the current time as
//!   a parameter and never reads the system clock itself
//! - **Fire-once semantics**: an armed alarm fires exactly once per
//!   armed period, even though its target matches for a full minute
//! - **Safe auto-expiry**: a fired alarm clears itself after a
//!   configurable window, with a generation check so a stale expiry can
//!   never clobber a newly armed alarm
//! - **Real-time**: WebSocket stream of per-tick snapshots and alarm
//!   transitions
//!
//! ## Modules
//!
//! - [`clock`]: state machine, rendering, tick driver
//! - [`events`]: event hub and WebSocket streaming
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sundial::api::{serve, ApiConfig, AppState};
//! use sundial::clock::{ClockDriver, DriverConfig};
//! use sundial::events::{EventHub, HubConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let hub = Arc::new(EventHub::new(HubConfig::default()));
//!     let driver = Arc::new(ClockDriver::new(DriverConfig::default(), Arc::clone(&hub)));
//!
//!     // Start the 1 Hz tick task
//!     let tick_handle = driver.start();
//!
//!     // Serve the HTTP/WebSocket surface
//!     let config = ApiConfig::default();
//!     let state = AppState::new(Arc::clone(&driver), hub, config.clone());
//!     serve(state, &config).await?;
//!
//!     driver.stop().await;
//!     tick_handle.abort();
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod clock;
pub mod config;
pub mod events;

// Re-export top-level types for convenience
pub use clock::{
    AlarmPhase, ClearReason, ClockDriver, ClockError, ClockResult, ClockSnapshot, ClockState,
    DisplayFormat, DriverConfig, Greeting, Locale, TimeOfDay,
};

pub use events::{ClientMessage, ClockEvent, EventHub, HubConfig, HubError, websocket_handler};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{
    Config, ConfigError, ApiConfig as ConfigApiConfig, ClockConfig, LoggingConfig,
};
