//! Task durations
//!
//! Durations travel as short human strings (`"30 min"`, `"1.5 hours"`), as offered by the task form and the suggestion services.
//! They are parsed once into a whole number of minutes.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DurationError;

/// The duration used when none is given
pub const DEFAULT_MINUTES: u32 = 60;

/// A task cannot last longer than a day, since tasks never wrap to the next date
pub const MAX_MINUTES: u32 = 24 * 60;

/// The choices offered by the task form
pub const DURATION_PRESETS: [&str; 6] = ["30 min", "1 hour", "1.5 hours", "2 hours", "2.5 hours", "3 hours"];

const HOUR_UNITS: [&str; 5] = ["h", "hr", "hrs", "hour", "hours"];
const MINUTE_UNITS: [&str; 5] = ["m", "min", "mins", "minute", "minutes"];


/// How long a task lasts, in whole minutes
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskDuration {
    minutes: u32,
}

impl TaskDuration {
    /// Build a duration from a number of minutes. Fails for zero, or for more than a day
    pub fn from_minutes(minutes: u32) -> Result<Self, DurationError> {
        if minutes == 0 || minutes > MAX_MINUTES {
            return Err(DurationError::OutOfRange(format!("{} min", minutes)));
        }
        Ok(Self { minutes })
    }

    pub fn minutes(&self) -> u32 { self.minutes }

    /// Lenient parsing, for values coming from places that cannot be trusted to follow the duration vocabulary.
    ///
    /// A missing or unparsable value falls back to the default duration (one hour).
    pub fn or_default(raw: Option<&str>) -> Self {
        match raw {
            None => Self::default(),
            Some(s) => s.parse().unwrap_or_else(|err| {
                log::warn!("Unable to parse duration {:?} ({}). Using the default duration", s, err);
                Self::default()
            }),
        }
    }
}

impl Default for TaskDuration {
    fn default() -> Self {
        Self { minutes: DEFAULT_MINUTES }
    }
}

impl FromStr for TaskDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DurationError::Empty);
        }

        let split = s.find(|c: char| !(c.is_ascii_digit() || c == '.')).unwrap_or(s.len());
        let (magnitude, unit) = s.split_at(split);
        let magnitude: f64 = magnitude.parse()
            .map_err(|_| DurationError::InvalidMagnitude(s.to_string()))?;

        let unit = unit.trim().to_ascii_lowercase();
        let factor = if HOUR_UNITS.contains(&unit.as_str()) {
            60.0
        } else if MINUTE_UNITS.contains(&unit.as_str()) {
            1.0
        } else {
            return Err(DurationError::UnknownUnit(unit));
        };

        let minutes = (magnitude * factor).round();
        if minutes < 1.0 || minutes > MAX_MINUTES as f64 {
            return Err(DurationError::OutOfRange(s.to_string()));
        }
        Ok(Self { minutes: minutes as u32 })
    }
}

impl Display for TaskDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.minutes {
            60 => write!(f, "1 hour"),
            m if m % 60 == 0 => write!(f, "{} hours", m / 60),
            m if m > 60 && m % 30 == 0 => write!(f, "{}.5 hours", m / 60),
            m => write!(f, "{} min", m),
        }
    }
}

/// Used to support serde
impl Serialize for TaskDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for TaskDuration {
    fn deserialize<D>(deserializer: D) -> Result<TaskDuration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
