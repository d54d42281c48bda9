//! Wall-clock times of day (`HH:MM`, 24-hour)

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TimeError;

/// A time of day, with a granularity of minutes
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    time: NaiveTime,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::InvalidHour(hour));
        }
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(|time| Self { time })
            .ok_or_else(|| TimeError::Malformed(format!("{}:{}", hour, minute)))
    }

    pub fn hour(&self) -> u32   { self.time.hour()   }
    pub fn minute(&self) -> u32 { self.time.minute() }
    pub fn as_naive(&self) -> NaiveTime { self.time }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Returns the same time, with its hour replaced (minutes are kept)
    pub fn with_hour(&self, hour: u32) -> Result<Self, TimeError> {
        Self::new(hour, self.minute())
    }

    /// Format an amount of minutes since midnight, wrapping past midnight
    pub(crate) fn label_for_minutes(minutes: u32) -> String {
        let minutes = minutes % (24 * 60);
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

/// The start times offered by the task form: every half-hour from 07:00 to 23:30
pub fn start_time_presets() -> Vec<ClockTime> {
    (0..34u32)
        .filter_map(|i| ClockTime::new(i / 2 + 7, (i % 2) * 30).ok())
        .collect()
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        // Seconds are below our granularity
        let time = time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time);
        Self { time }
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(|time| Self { time })
            .map_err(|_| TimeError::Malformed(s.to_string()))
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.time.format("%H:%M"))
    }
}

/// Used to support serde
impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<ClockTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
