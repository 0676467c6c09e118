//! Rendering of clock snapshots
//!
//! Formats the sampled wall-clock time into the strings the host UI
//! displays: the time (24-hour or 12-hour with AM/PM), the localized
//! date line, and the greeting for the current time-of-day band.
//!
//! Rendering is pure: everything is computed from an injected timestamp
//! plus the display format and locale, so every output is unit testable
//! against fixed times.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::clock::state::ClockState;
use crate::clock::types::{AlarmPhase, DisplayFormat};

/// Language used for date lines and greetings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "en")]
    English,
}

const DAY_NAMES_ES: [&str; 7] = [
    "Domingo", "Lunes", "Martes", "Miércoles", "Jueves", "Viernes", "Sábado",
];

const DAY_NAMES_EN: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

const MONTH_NAMES_ES: [&str; 12] = [
    "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio", "Julio", "Agosto", "Septiembre",
    "Octubre", "Noviembre", "Diciembre",
];

const MONTH_NAMES_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Time-of-day band for the greeting line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    /// [05:00, 12:00)
    Morning,
    /// [12:00, 18:00)
    Afternoon,
    /// [18:00, 21:00)
    Evening,
    /// [21:00, 05:00)
    Night,
}

impl Greeting {
    /// Select the band for an hour in 24-hour form
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Greeting::Morning,
            12..=17 => Greeting::Afternoon,
            18..=20 => Greeting::Evening,
            _ => Greeting::Night,
        }
    }

    /// Localized greeting text
    pub fn text(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Spanish => match self {
                Greeting::Morning => "Buenos días ☀️",
                Greeting::Afternoon => "Buenas tardes 🌤️",
                Greeting::Evening => "Buenas noches 🌆",
                Greeting::Night => "Buenas noches 🌙",
            },
            Locale::English => match self {
                Greeting::Morning => "Good morning ☀️",
                Greeting::Afternoon => "Good afternoon 🌤️",
                Greeting::Evening => "Good evening 🌆",
                Greeting::Night => "Good night 🌙",
            },
        }
    }
}

/// Format a time according to the display format
///
/// 24-hour: `HH:MM:SS`. 12-hour: `hh:MM:SS AM/PM`, where hour 0 maps
/// to 12 and hours stay zero-padded to two digits.
pub fn format_time(time: NaiveTime, format: DisplayFormat) -> String {
    match format {
        DisplayFormat::H24 => format!(
            "{:02}:{:02}:{:02}",
            time.hour(),
            time.minute(),
            time.second()
        ),
        DisplayFormat::H12 => {
            let meridiem = if time.hour() >= 12 { "PM" } else { "AM" };
            let mut hour = time.hour() % 12;
            if hour == 0 {
                hour = 12;
            }
            format!(
                "{:02}:{:02}:{:02} {}",
                hour,
                time.minute(),
                time.second(),
                meridiem
            )
        }
    }
}

/// Format a date line with localized day and month names
///
/// Spanish: `Domingo, 26 de Noviembre de 2024`
/// English: `Sunday, November 26, 2024`
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    let weekday = date.weekday().num_days_from_sunday() as usize;
    let month = date.month0() as usize;

    match locale {
        Locale::Spanish => format!(
            "{}, {:02} de {} de {}",
            DAY_NAMES_ES[weekday],
            date.day(),
            MONTH_NAMES_ES[month],
            date.year()
        ),
        Locale::English => format!(
            "{}, {} {:02}, {}",
            DAY_NAMES_EN[weekday],
            MONTH_NAMES_EN[month],
            date.day(),
            date.year()
        ),
    }
}

/// Alarm portion of a snapshot
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlarmStatus {
    /// Current phase of the alarm state machine
    pub phase: AlarmPhase,
    /// Target time (`HH:MM`, 24-hour), if an alarm is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// One rendered frame of the clock, produced once per tick
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClockSnapshot {
    /// Formatted time string
    pub time: String,
    /// Localized date line
    pub date: String,
    /// Greeting for the current time-of-day band
    pub greeting: String,
    /// Display format the time string was rendered with
    pub format: DisplayFormat,
    /// Alarm status for display
    pub alarm: AlarmStatus,
}

impl ClockSnapshot {
    /// Render a snapshot of the given state at the given instant
    pub fn compose(state: &ClockState, now: NaiveDateTime, locale: Locale) -> Self {
        Self {
            time: format_time(now.time(), state.format()),
            date: format_date(now.date(), locale),
            greeting: Greeting::for_hour(now.time().hour()).text(locale).to_string(),
            format: state.format(),
            alarm: AlarmStatus {
                phase: state.phase(),
                target: state.target().map(|t| t.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_format_time_24h() {
        assert_eq!(format_time(time(7, 5, 9), DisplayFormat::H24), "07:05:09");
        assert_eq!(format_time(time(23, 59, 59), DisplayFormat::H24), "23:59:59");
    }

    #[test]
    fn test_format_time_12h_midnight_is_12_am() {
        assert_eq!(format_time(time(0, 0, 0), DisplayFormat::H12), "12:00:00 AM");
    }

    #[test]
    fn test_format_time_12h_afternoon() {
        assert_eq!(format_time(time(13, 5, 0), DisplayFormat::H12), "01:05:00 PM");
        assert_eq!(format_time(time(12, 0, 0), DisplayFormat::H12), "12:00:00 PM");
        assert_eq!(format_time(time(11, 59, 0), DisplayFormat::H12), "11:59:00 AM");
    }

    #[test]
    fn test_toggle_round_trip_renders_identically() {
        let sample = time(15, 42, 7);
        let format = DisplayFormat::H24;
        let before = format_time(sample, format);
        let after = format_time(sample, format.toggled().toggled());
        assert_eq!(before, after);
    }

    #[test]
    fn test_greeting_band_boundaries() {
        assert_eq!(Greeting::for_hour(4), Greeting::Night);
        assert_eq!(Greeting::for_hour(5), Greeting::Morning);
        assert_eq!(Greeting::for_hour(11), Greeting::Morning);
        assert_eq!(Greeting::for_hour(12), Greeting::Afternoon);
        assert_eq!(Greeting::for_hour(17), Greeting::Afternoon);
        assert_eq!(Greeting::for_hour(18), Greeting::Evening);
        assert_eq!(Greeting::for_hour(20), Greeting::Evening);
        assert_eq!(Greeting::for_hour(21), Greeting::Night);
        assert_eq!(Greeting::for_hour(0), Greeting::Night);
    }

    #[test]
    fn test_format_date_spanish() {
        // 2024-11-26 was a Tuesday
        let date = NaiveDate::from_ymd_opt(2024, 11, 26).unwrap();
        assert_eq!(
            format_date(date, Locale::Spanish),
            "Martes, 26 de Noviembre de 2024"
        );
    }

    #[test]
    fn test_format_date_english() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        assert_eq!(format_date(date, Locale::English), "Sunday, November 03, 2024");
    }

    #[test]
    fn test_snapshot_compose() {
        let state = ClockState::new(DisplayFormat::H24);
        let now = NaiveDate::from_ymd_opt(2024, 11, 26)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        let snapshot = ClockSnapshot::compose(&state, now, Locale::Spanish);
        assert_eq!(snapshot.time, "09:30:00");
        assert_eq!(snapshot.date, "Martes, 26 de Noviembre de 2024");
        assert_eq!(snapshot.greeting, "Buenos días ☀️");
        assert_eq!(snapshot.alarm.phase, AlarmPhase::Unarmed);
        assert_eq!(snapshot.alarm.target, None);
    }

    #[test]
    fn test_snapshot_serializes_without_target_when_unarmed() {
        let state = ClockState::new(DisplayFormat::H24);
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        let json = serde_json::to_string(&ClockSnapshot::compose(&state, now, Locale::English))
            .unwrap();
        assert!(json.contains("\"phase\":\"unarmed\""));
        assert!(!json.contains("\"target\""));
    }
}
