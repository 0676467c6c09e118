//! Clock driver
//!
//! Owns the `ClockState` and drives it from a single recurring tick
//! task, the same way the rest of the codebase runs background work: a
//! `tokio::time::interval` inside a spawned task with a shutdown flag
//! checked each iteration.
//!
//! The 60-second auto-expiry after a fire is a separate one-shot task.
//! It carries the alarm generation observed at fire time and goes
//! through `ClockState::expire`, which refuses a stale generation, so a
//! cancel or re-arm racing the expiry is always safe.

use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::interval;

use crate::clock::error::ClockResult;
use crate::clock::render::{ClockSnapshot, Locale};
use crate::clock::state::{ClearReason, ClockState};
use crate::clock::types::{AlarmPhase, DisplayFormat, TimeOfDay};
use crate::events::{ClockEvent, EventHub};

/// Configuration for the clock driver
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Tick period (nominally one second)
    pub tick_interval: Duration,
    /// How long a fired alarm stays up before auto-expiry
    pub alarm_expiry: Duration,
    /// Locale for date lines and greetings
    pub locale: Locale,
    /// Display format at startup
    pub initial_format: DisplayFormat,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            alarm_expiry: Duration::from_secs(60),
            locale: Locale::default(),
            initial_format: DisplayFormat::H24,
        }
    }
}

/// Drives the clock state machine and publishes events
pub struct ClockDriver {
    state: RwLock<ClockState>,
    hub: Arc<EventHub>,
    config: DriverConfig,
    shutdown: RwLock<bool>,
}

impl ClockDriver {
    /// Create a new driver with no alarm set
    pub fn new(config: DriverConfig, hub: Arc<EventHub>) -> Self {
        Self {
            state: RwLock::new(ClockState::new(config.initial_format)),
            hub,
            config,
            shutdown: RwLock::new(false),
        }
    }

    /// Start the tick task
    pub fn start(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let driver = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = interval(driver.config.tick_interval);

            loop {
                ticker.tick().await;

                if *driver.shutdown.read().await {
                    break;
                }

                driver.tick_once().await;
            }
        })
    }

    /// Stop the tick task
    pub async fn stop(&self) {
        *self.shutdown.write().await = true;
    }

    /// Whether the tick task is (still) meant to be running
    pub async fn is_running(&self) -> bool {
        !*self.shutdown.read().await
    }

    /// Run one tick: advance the state machine and publish events
    async fn tick_once(self: &Arc<Self>) {
        let now = Local::now().naive_local();

        let (snapshot, fired) = {
            let mut state = self.state.write().await;
            let fired = state.tick(now.time()).map(|target| (target, state.generation()));
            let snapshot = ClockSnapshot::compose(&state, now, self.config.locale);
            (snapshot, fired)
        };

        self.hub.publish(ClockEvent::tick(snapshot)).await;

        if let Some((target, generation)) = fired {
            tracing::info!(target = %target, generation, "Alarm fired");
            self.hub.publish(ClockEvent::fired(target)).await;
            self.schedule_expiry(generation);
        }
    }

    /// Schedule the one-shot auto-expiry for a fired alarm
    fn schedule_expiry(self: &Arc<Self>, generation: u64) {
        let driver = Arc::clone(self);
        let expiry = self.config.alarm_expiry;

        tokio::spawn(async move {
            tokio::time::sleep(expiry).await;
            driver.expire(generation).await;
        });
    }

    /// Auto-expiry entry point; a no-op if the alarm was already
    /// cleared or replaced since it fired
    async fn expire(&self, generation: u64) {
        let cleared = self.state.write().await.expire(generation);
        if cleared {
            tracing::info!(generation, "Fired alarm auto-expired");
            self.hub.publish(ClockEvent::cleared(ClearReason::Expired)).await;
        }
    }

    /// Arm an alarm from user-supplied `HH:MM` text
    ///
    /// Returns the accepted target, or the validation error for the
    /// caller to surface. Failures do not mutate state.
    pub async fn arm(&self, input: &str) -> ClockResult<TimeOfDay> {
        let target: TimeOfDay = input.parse()?;
        let now = Local::now().time();

        let accepted = self.state.write().await.arm(target, now)?;

        tracing::info!(target = %accepted, "Alarm armed");
        self.hub.publish(ClockEvent::armed(accepted)).await;
        Ok(accepted)
    }

    /// Cancel the alarm preemptively; idempotent
    pub async fn cancel(&self) {
        self.clear_with_reason(ClearReason::Cancelled).await;
    }

    /// Dismiss a fired alarm; same transition as cancel, distinguished
    /// only by caller intent
    pub async fn dismiss(&self) {
        self.clear_with_reason(ClearReason::Dismissed).await;
    }

    async fn clear_with_reason(&self, reason: ClearReason) {
        let cleared = self.state.write().await.clear();
        if cleared {
            tracing::info!(?reason, "Alarm cleared");
            self.hub.publish(ClockEvent::cleared(reason)).await;
        }
    }

    /// Flip the display format, returning the new value
    pub async fn toggle_format(&self) -> DisplayFormat {
        let format = self.state.write().await.toggle_format();
        tracing::debug!(%format, "Display format toggled");
        format
    }

    /// Render a snapshot of the current state on demand
    pub async fn snapshot(&self) -> ClockSnapshot {
        let now = Local::now().naive_local();
        let state = self.state.read().await;
        ClockSnapshot::compose(&state, now, self.config.locale)
    }

    /// Current phase of the alarm state machine
    pub async fn phase(&self) -> AlarmPhase {
        self.state.read().await.phase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::error::ClockError;
    use crate::events::HubConfig;
    use chrono::NaiveTime;
    use tokio::sync::mpsc;

    fn test_driver() -> Arc<ClockDriver> {
        let hub = Arc::new(EventHub::new(HubConfig::default()));
        Arc::new(ClockDriver::new(DriverConfig::default(), hub))
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[tokio::test]
    async fn test_arm_rejects_malformed_input() {
        let driver = test_driver();

        let result = driver.arm("not a time").await;
        assert!(matches!(result, Err(ClockError::InvalidInput(_))));
        assert_eq!(driver.phase().await, AlarmPhase::Unarmed);
    }

    #[tokio::test]
    async fn test_cancel_without_alarm_is_noop() {
        let driver = test_driver();

        driver.cancel().await;
        driver.cancel().await;
        assert_eq!(driver.phase().await, AlarmPhase::Unarmed);
    }

    #[tokio::test]
    async fn test_toggle_format_round_trip() {
        let driver = test_driver();

        assert_eq!(driver.toggle_format().await, DisplayFormat::H12);
        assert_eq!(driver.toggle_format().await, DisplayFormat::H24);
    }

    #[tokio::test]
    async fn test_snapshot_reports_unarmed() {
        let driver = test_driver();

        let snapshot = driver.snapshot().await;
        assert_eq!(snapshot.alarm.phase, AlarmPhase::Unarmed);
        assert_eq!(snapshot.alarm.target, None);
    }

    #[tokio::test]
    async fn test_expire_clears_fired_alarm_and_publishes() {
        let hub = Arc::new(EventHub::new(HubConfig::default()));
        let driver = Arc::new(ClockDriver::new(DriverConfig::default(), Arc::clone(&hub)));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = hub.register(tx).await.unwrap();

        // Drive the state machine with simulated times
        let generation = {
            let mut state = driver.state.write().await;
            state.arm("07:30".parse().unwrap(), at(7, 0)).unwrap();
            state.tick(at(7, 30)).unwrap();
            state.generation()
        };

        driver.expire(generation).await;
        assert_eq!(driver.phase().await, AlarmPhase::Unarmed);

        let event = rx.try_recv().unwrap();
        assert!(matches!(
            event,
            ClockEvent::AlarmCleared {
                reason: ClearReason::Expired
            }
        ));

        hub.unregister(&conn).await;
    }

    #[tokio::test]
    async fn test_expire_with_stale_generation_is_silent() {
        let hub = Arc::new(EventHub::new(HubConfig::default()));
        let driver = Arc::new(ClockDriver::new(DriverConfig::default(), Arc::clone(&hub)));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = hub.register(tx).await.unwrap();

        let stale_generation = {
            let mut state = driver.state.write().await;
            state.arm("07:30".parse().unwrap(), at(7, 0)).unwrap();
            state.tick(at(7, 30)).unwrap();
            let fired = state.generation();

            // Re-arm before the expiry wakes up
            state.clear();
            state.arm("09:00".parse().unwrap(), at(7, 31)).unwrap();
            fired
        };

        driver.expire(stale_generation).await;

        assert_eq!(driver.phase().await, AlarmPhase::Armed);
        assert!(rx.try_recv().is_err(), "stale expiry must publish nothing");

        hub.unregister(&conn).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_expiry_clears_after_window() {
        let driver = test_driver();

        let generation = {
            let mut state = driver.state.write().await;
            state.arm("07:30".parse().unwrap(), at(7, 0)).unwrap();
            state.tick(at(7, 30)).unwrap();
            state.generation()
        };

        driver.schedule_expiry(generation);

        // Just before the window the alarm is still up
        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(driver.phase().await, AlarmPhase::Fired);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(driver.phase().await, AlarmPhase::Unarmed);
    }

    #[tokio::test]
    async fn test_stop_marks_not_running() {
        let driver = test_driver();

        assert!(driver.is_running().await);
        driver.stop().await;
        assert!(!driver.is_running().await);
    }
}
