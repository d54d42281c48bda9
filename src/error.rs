//! Error types of this crate
//!
//! Values that come from outside (form fields, suggestion records) are parsed once, at the boundary, into typed values.
//! These are the errors such parsing can produce.

use thiserror::Error;

/// Errors when parsing or building a wall-clock time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// The string is not a `HH:MM` 24-hour time
    #[error("Invalid time of day {0:?} (expected HH:MM)")]
    Malformed(String),

    /// The hour does not exist on a 24-hour clock
    #[error("Invalid hour {0} (expected 0..=23)")]
    InvalidHour(u32),
}

/// Errors when parsing a priority level
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriorityError {
    #[error("Unknown priority {0:?} (expected low, medium or high)")]
    Unknown(String),
}

/// Errors when parsing a task duration such as `"30 min"` or `"1.5 hours"`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("Empty duration")]
    Empty,

    /// The numeric part cannot be read as a number
    #[error("Invalid duration magnitude {0:?}")]
    InvalidMagnitude(String),

    /// Zero, negative, or too large to be a task length
    #[error("Duration out of range: {0:?}")]
    OutOfRange(String),

    /// Only minutes and hours are supported
    #[error("Unknown duration unit {0:?} (expected minutes or hours)")]
    UnknownUnit(String),
}

/// Errors when building a task
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("A task title cannot be empty")]
    EmptyTitle,

    #[error(transparent)]
    Time(#[from] TimeError),

    #[error(transparent)]
    Duration(#[from] DurationError),
}

/// Errors when accepting a suggestion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// The index does not match any of the pending suggestions
    #[error("No pending suggestion at index {0}")]
    NoSuchSuggestion(usize),

    #[error(transparent)]
    Task(#[from] TaskError),
}
