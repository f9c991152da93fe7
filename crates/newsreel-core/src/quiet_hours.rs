// Quiet hours - a daily window where notifications stay silent
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A validated 24-hour wall clock time
///
/// Stored as minutes since midnight. On the wire it's an "HH:MM" string,
/// and deserializing anything else fails, so a loaded `Settings` can never
/// carry a corrupt time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const DEFAULT_QUIET_START: TimeOfDay = TimeOfDay(22 * 60);
    pub const DEFAULT_QUIET_END: TimeOfDay = TimeOfDay(8 * 60);

    /// Build from hour and minute, `None` if either is out of range
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then(|| Self(hour as u16 * 60 + minute as u16))
    }

    pub fn from_time(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    pub fn minutes_since_midnight(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    /// Accepts "H:MM" or "HH:MM"
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidTime(s.to_string());

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

        if !digits(hour) || hour.len() > 2 || !digits(minute) || minute.len() != 2 {
            return Err(invalid());
        }

        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;

        TimeOfDay::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Daily window `[start, end)`, wrapping past midnight when start > end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuietHours {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl QuietHours {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, now: TimeOfDay) -> bool {
        let (start, end, now) = (self.start.0, self.end.0, now.0);

        if start <= end {
            // Same-day window, e.g. 08:00-22:00. start == end is empty.
            now >= start && now < end
        } else {
            // Overnight window, e.g. 22:00-08:00
            now >= start || now < end
        }
    }

    /// Length of the window in minutes
    pub fn duration_minutes(&self) -> u16 {
        (self.end.0 + MINUTES_PER_DAY - self.start.0) % MINUTES_PER_DAY
    }
}

/// Check quiet hours straight from "HH:MM" strings
///
/// A malformed time is an error rather than "not quiet": it means the
/// settings are corrupt and the caller should know.
pub fn is_within_quiet_hours(start: &str, end: &str, now: NaiveTime) -> Result<bool> {
    let window = QuietHours::new(start.parse()?, end.parse()?);
    Ok(window.contains(TimeOfDay::from_time(now)))
}

/// Source of the current local wall time
///
/// Injected into the matcher so quiet-hours decisions can be replayed.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveTime;
}

/// Reads the local system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        chrono::Local::now().time()
    }
}

/// Always reports the same time
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl FixedClock {
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    /// `None` when hour or minute is out of range
    pub fn at(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn window(start: &str, end: &str) -> QuietHours {
        QuietHours::new(start.parse().unwrap(), end.parse().unwrap())
    }

    #[test]
    fn test_parse_time_of_day() {
        let time: TimeOfDay = "22:30".parse().unwrap();
        assert_eq!(time.hour(), 22);
        assert_eq!(time.minute(), 30);
        assert_eq!(time.minutes_since_midnight(), 22 * 60 + 30);

        let early: TimeOfDay = "7:05".parse().unwrap();
        assert_eq!(early.to_string(), "07:05");
    }

    #[test]
    fn test_reject_malformed_times() {
        for bad in ["", "garbage", "24:00", "12:60", "12", "12:5", "-1:00", "12:00:00", "ab:cd", "123:00"] {
            let result = bad.parse::<TimeOfDay>();
            assert!(
                matches!(result, Err(Error::InvalidTime(_))),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_time_of_day_serde() {
        let time: TimeOfDay = serde_json::from_str("\"08:00\"").unwrap();
        assert_eq!(time, TimeOfDay::new(8, 0).unwrap());
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"08:00\"");

        assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
    }

    #[test]
    fn test_overnight_window() {
        assert!(is_within_quiet_hours("22:00", "08:00", at(23, 30)).unwrap());
        assert!(is_within_quiet_hours("22:00", "08:00", at(3, 0)).unwrap());
        assert!(!is_within_quiet_hours("22:00", "08:00", at(12, 0)).unwrap());
    }

    #[test]
    fn test_same_day_window() {
        assert!(is_within_quiet_hours("08:00", "22:00", at(12, 0)).unwrap());
        assert!(!is_within_quiet_hours("08:00", "22:00", at(23, 30)).unwrap());
    }

    #[test]
    fn test_window_edges() {
        let day = window("08:00", "22:00");
        assert!(day.contains("08:00".parse().unwrap())); // start is inclusive
        assert!(!day.contains("22:00".parse().unwrap())); // end is exclusive
        assert!(day.contains("21:59".parse().unwrap()));

        let night = window("22:00", "08:00");
        assert!(night.contains("22:00".parse().unwrap()));
        assert!(night.contains("00:00".parse().unwrap()));
        assert!(night.contains("07:59".parse().unwrap()));
        assert!(!night.contains("08:00".parse().unwrap()));
    }

    #[test]
    fn test_zero_length_window_matches_nothing() {
        let empty = window("10:00", "10:00");
        for hour in 0..24 {
            let time = TimeOfDay::new(hour, 0).unwrap();
            assert!(!empty.contains(time));
        }
        assert_eq!(empty.duration_minutes(), 0);
    }

    #[test]
    fn test_duration() {
        assert_eq!(window("22:00", "08:00").duration_minutes(), 10 * 60);
        assert_eq!(window("08:00", "22:00").duration_minutes(), 14 * 60);
    }

    #[test]
    fn test_malformed_strings_fail_loud() {
        assert!(is_within_quiet_hours("late", "08:00", at(12, 0)).is_err());
        assert!(is_within_quiet_hours("22:00", "", at(12, 0)).is_err());
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::at(3, 15).unwrap();
        assert_eq!(clock.now(), at(3, 15));
        assert!(FixedClock::at(24, 0).is_none());
    }
}
