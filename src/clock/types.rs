//! Core types for the clock state machine
//!
//! This module defines the fundamental types used throughout the clock:
//! - `TimeOfDay`: an hours/minutes pair, always stored in 24-hour form
//! - `DisplayFormat`: 24-hour vs 12-hour rendering
//! - `AlarmPhase`: the observable phase of the alarm state machine
//!
//! Alarm targets are compared as integer pairs, never as formatted
//! strings, so comparison is independent of the display format.

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

use crate::clock::error::{ClockError, ClockResult};

/// A wall-clock time of day with minute resolution
///
/// The derived ordering is lexicographic on (hour, minute), which is
/// exactly the "strictly later in the same day" comparison the alarm
/// validation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    /// Hour in 24-hour form (0-23)
    pub hour: u32,
    /// Minute (0-59)
    pub minute: u32,
}

fn time_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([0-9]{1,2}):([0-9]{2})\s*$").expect("valid time regex"))
}

impl TimeOfDay {
    /// Create a time of day, validating the ranges
    pub fn new(hour: u32, minute: u32) -> ClockResult<Self> {
        if hour > 23 || minute > 59 {
            return Err(ClockError::InvalidInput(format!(
                "{:02}:{:02} is out of range",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Check whether this target is strictly after `other`
    ///
    /// Same-day semantics: an equal or earlier pair is not "after", and
    /// no day-rollover is considered.
    pub fn is_after(&self, other: TimeOfDay) -> bool {
        *self > other
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ClockError::InvalidInput("no time provided".to_string()));
        }

        let caps = time_pattern().captures(s).ok_or_else(|| {
            ClockError::InvalidInput(format!("expected HH:MM, got {:?}", s.trim()))
        })?;

        // The pattern guarantees 1-2 digit groups, so parsing cannot overflow
        let hour: u32 = caps[1]
            .parse()
            .map_err(|_| ClockError::InvalidInput(format!("bad hour in {:?}", s.trim())))?;
        let minute: u32 = caps[2]
            .parse()
            .map_err(|_| ClockError::InvalidInput(format!("bad minute in {:?}", s.trim())))?;

        Self::new(hour, minute)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// How the current time is rendered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DisplayFormat {
    /// 24-hour rendering: `HH:MM:SS`
    #[serde(rename = "24h")]
    H24,
    /// 12-hour rendering: `hh:MM:SS AM/PM`, hour 0 shown as 12
    #[serde(rename = "12h")]
    H12,
}

impl DisplayFormat {
    /// The other format
    pub fn toggled(self) -> Self {
        match self {
            DisplayFormat::H24 => DisplayFormat::H12,
            DisplayFormat::H12 => DisplayFormat::H24,
        }
    }
}

impl std::fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayFormat::H24 => write!(f, "24h"),
            DisplayFormat::H12 => write!(f, "12h"),
        }
    }
}

/// Observable phase of the alarm state machine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlarmPhase {
    /// No alarm is set
    Unarmed,
    /// An alarm is set and waiting for its target time
    Armed,
    /// The alarm has gone off and awaits dismissal or auto-expiry
    Fired,
}

impl std::fmt::Display for AlarmPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlarmPhase::Unarmed => write!(f, "unarmed"),
            AlarmPhase::Armed => write!(f, "armed"),
            AlarmPhase::Fired => write!(f, "fired"),
        }
    }
}
