//! Alarm clock state machine
//!
//! `ClockState` owns the display format and the optional alarm, and
//! implements the UNARMED → ARMED → FIRED → UNARMED cycle:
//!
//! ```text
//! UNARMED --arm(valid future time)--> ARMED
//! ARMED   --cancel--> UNARMED
//! ARMED   --tick matches target--> FIRED
//! FIRED   --dismiss | cancel | auto-expiry--> UNARMED
//! ```
//!
//! The state machine never reads the system clock itself; callers
//! sample the clock and pass the current time into each operation.
//! That keeps every transition deterministic under test.
//!
//! Each armed period carries a generation number. The driver's deferred
//! auto-expiry task records the generation it saw at fire time and
//! clears the alarm only if that generation is still current, so an
//! expiry racing a cancel-then-rearm can never clobber the new alarm.

use chrono::NaiveTime;
use serde::Serialize;

use crate::clock::error::{ClockError, ClockResult};
use crate::clock::types::{AlarmPhase, DisplayFormat, TimeOfDay};

/// An armed (or fired) alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Alarm {
    /// Target time, always in 24-hour form
    target: TimeOfDay,
    /// Set the instant the target matches a tick; never reset while the
    /// alarm remains set, so the alarm fires at most once per armed
    /// period even though the target keeps matching for a full minute
    fired: bool,
}

/// Why an alarm was cleared
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClearReason {
    /// User cancelled an alarm that had not fired yet
    Cancelled,
    /// User acknowledged a fired alarm
    Dismissed,
    /// The auto-expiry window elapsed after firing
    Expired,
}

/// Process-wide clock state: display format plus the optional alarm
#[derive(Debug)]
pub struct ClockState {
    format: DisplayFormat,
    alarm: Option<Alarm>,
    /// Bumped on every arm and every clear; identifies an armed period
    generation: u64,
}

impl ClockState {
    /// Create a fresh state with no alarm set
    pub fn new(format: DisplayFormat) -> Self {
        Self {
            format,
            alarm: None,
            generation: 0,
        }
    }

    /// Arm an alarm for `target`, replacing any existing alarm
    ///
    /// The target must be strictly later than `now` within the same day
    /// (greater hour, or same hour with greater minute). Validation
    /// failures leave the state untouched.
    pub fn arm(&mut self, target: TimeOfDay, now: NaiveTime) -> ClockResult<TimeOfDay> {
        if !target.is_after(TimeOfDay::from(now)) {
            return Err(ClockError::PastTime);
        }

        self.alarm = Some(Alarm {
            target,
            fired: false,
        });
        self.generation += 1;
        Ok(target)
    }

    /// Clear the alarm unconditionally
    ///
    /// Idempotent: returns `true` if an alarm was actually cleared.
    pub fn clear(&mut self) -> bool {
        if self.alarm.take().is_some() {
            self.generation += 1;
            true
        } else {
            false
        }
    }

    /// Advance the state machine by one tick at the given time
    ///
    /// Returns the target if the alarm fired on this tick. The fired
    /// flag guarantees at most one fire per armed period; subsequent
    /// ticks within the same minute report nothing.
    pub fn tick(&mut self, now: NaiveTime) -> Option<TimeOfDay> {
        let alarm = self.alarm.as_mut()?;
        if alarm.fired || alarm.target != TimeOfDay::from(now) {
            return None;
        }

        alarm.fired = true;
        Some(alarm.target)
    }

    /// Clear a fired alarm if `generation` still identifies it
    ///
    /// This is the auto-expiry entry point. A stale generation (the
    /// alarm was cleared or re-armed since it fired) makes this a
    /// no-op. Returns `true` if the alarm was cleared.
    pub fn expire(&mut self, generation: u64) -> bool {
        let fired = matches!(self.alarm, Some(Alarm { fired: true, .. }));
        if fired && self.generation == generation {
            self.clear()
        } else {
            false
        }
    }

    /// Flip between 24-hour and 12-hour display, returning the new format
    ///
    /// The stored alarm target is untouched; it is always kept in
    /// 24-hour form so comparisons are format-independent.
    pub fn toggle_format(&mut self) -> DisplayFormat {
        self.format = self.format.toggled();
        self.format
    }

    /// Current display format
    pub fn format(&self) -> DisplayFormat {
        self.format
    }

    /// Current phase of the alarm state machine
    pub fn phase(&self) -> AlarmPhase {
        match self.alarm {
            None => AlarmPhase::Unarmed,
            Some(Alarm { fired: false, .. }) => AlarmPhase::Armed,
            Some(Alarm { fired: true, .. }) => AlarmPhase::Fired,
        }
    }

    /// Target of the current alarm, if one is set
    pub fn target(&self) -> Option<TimeOfDay> {
        self.alarm.map(|a| a.target)
    }

    /// Generation of the current armed period
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
