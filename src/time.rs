//! Time-of-day values and free-form time/duration parsing.
//!
//! Windows inside the planner are minutes from midnight, the same convention
//! the scheduler uses for its cursor. `TimeOfDay` is the public face of that
//! number: it formats as `HH:MM`, serializes as a string and converts to and
//! from `chrono::NaiveTime` at the boundary.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time with minute precision, `00:00..=23:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const LAST_MINUTE: TimeOfDay = TimeOfDay(MINUTES_PER_DAY as u16 - 1);

    /// Builds a time from hours and minutes, saturating at 23:59.
    pub const fn hm(hours: u16, minutes: u16) -> Self {
        let total = hours * 60 + minutes;
        if total >= MINUTES_PER_DAY as u16 {
            Self::LAST_MINUTE
        } else {
            Self(total)
        }
    }

    /// Builds a time from minutes after midnight; `None` past 23:59.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then(|| Self(minutes as u16))
    }

    /// Minutes after midnight.
    pub const fn minutes(self) -> u32 {
        self.0 as u32
    }

    pub const fn hour(self) -> u32 {
        self.0 as u32 / 60
    }

    pub const fn minute(self) -> u32 {
        self.0 as u32 % 60
    }

    /// Parses the loose forms visitors type: `10:00`, `10h30`, `10h`, `10 am`, `2:30pm`.
    ///
    /// Hours and minutes outside their range are rejected rather than clamped.
    pub fn parse_loose(input: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidTime(input.to_string());
        let mut text: String = input
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let (mut pm, mut am) = (false, false);
        if let Some(stripped) = text.strip_suffix("pm") {
            pm = true;
            text = stripped.to_string();
        } else if let Some(stripped) = text.strip_suffix("am") {
            am = true;
            text = stripped.to_string();
        }

        let normalized = text.replace('h', ":");
        let (hours, minutes) = match normalized.split_once(':') {
            Some((h, "")) => (h, "0"),
            Some((h, m)) => (h, m),
            None => (normalized.as_str(), "0"),
        };
        if hours.is_empty() || hours.len() > 2 || minutes.len() > 2 {
            return Err(invalid());
        }
        let mut hours: u16 = hours.parse().map_err(|_| invalid())?;
        let minutes: u16 = minutes.parse().map_err(|_| invalid())?;
        if pm && hours < 12 {
            hours += 12;
        } else if am && hours == 12 {
            hours = 0;
        }
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }
        Ok(Self(hours * 60 + minutes))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseError;

    /// Strict `HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Self::from)
            .map_err(|_| ParseError::InvalidTime(s.to_string()))
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl From<TimeOfDay> for NaiveTime {
    fn from(time: TimeOfDay) -> Self {
        NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or_default()
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses visit lengths such as `"180"`, `"90 min"`, `"2h"`, `"2h30"`, `"2:30"`.
///
/// The result is not range-checked; that is `TripFacts::validate`'s job.
pub fn parse_duration_minutes(input: &str) -> Result<u32, ParseError> {
    let invalid = || ParseError::InvalidDuration(input.to_string());
    let text: String = input
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if text.is_empty() {
        return Err(invalid());
    }

    let number = |s: &str| -> Result<u32, ParseError> {
        if s.is_empty() {
            Ok(0)
        } else {
            s.parse().map_err(|_| invalid())
        }
    };

    if let Some(rest) = text
        .strip_suffix("minutes")
        .or_else(|| text.strip_suffix("min"))
        .or_else(|| text.strip_suffix('m'))
    {
        if rest.is_empty() {
            return Err(invalid());
        }
        return number(rest);
    }
    if let Some((h, m)) = text.split_once('h').or_else(|| text.split_once(':')) {
        if h.is_empty() || h.len() > 2 || m.len() > 2 {
            return Err(invalid());
        }
        let minutes = number(m)?;
        if minutes > 59 {
            return Err(invalid());
        }
        return number(h)?
            .checked_mul(60)
            .and_then(|total| total.checked_add(minutes))
            .ok_or_else(invalid);
    }
    number(&text)
}
