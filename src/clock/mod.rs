//! Clock core
//!
//! The alarm clock state machine and everything around it:
//!
//! - [`types`]: time-of-day, display format, alarm phase
//! - [`state`]: the UNARMED → ARMED → FIRED → UNARMED state machine
//! - [`render`]: time/date/greeting formatting and snapshots
//! - [`driver`]: the 1 Hz tick task and auto-expiry scheduling
//! - [`error`]: the two arm-time validation errors
//!
//! The state machine and rendering are synchronous and take the current
//! time as a parameter; only the driver touches the system clock and
//! the async runtime.

pub mod driver;
pub mod error;
pub mod render;
pub mod state;
pub mod types;

pub use driver::{ClockDriver, DriverConfig};
pub use error::{ClockError, ClockResult};
pub use render::{format_date, format_time, AlarmStatus, ClockSnapshot, Greeting, Locale};
pub use state::{ClearReason, ClockState};
pub use types::{AlarmPhase, DisplayFormat, TimeOfDay};
