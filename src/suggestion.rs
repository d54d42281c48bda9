//! Task suggestions, as returned by a [`SuggestionSource`](crate::traits::SuggestionSource)
//!
//! A suggestion is a task-like record. It only becomes a [`Task`] once a user accepts it, through [`to_task`].

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::clock::ClockTime;
use crate::duration::TaskDuration;
use crate::error::TaskError;
use crate::priority::Priority;
use crate::task::Task;

/// The start time of accepted suggestions that do not suggest any
pub const DEFAULT_SUGGESTION_TIME: (u32, u32) = (9, 0);

/// A candidate task, proposed by an external service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `null` or missing means [`Priority::default`]
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    /// Kept as provided (e.g. `"2 hours"`). It is only parsed when the suggestion is accepted
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default, alias = "date", skip_serializing_if = "Option::is_none")]
    pub suggested_date: Option<NaiveDate>,
    #[serde(default, alias = "startTime", skip_serializing_if = "Option::is_none")]
    pub suggested_time: Option<ClockTime>,
}

impl Suggestion {
    pub fn new(title: &str, description: &str, priority: Priority, duration: &str) -> Self {
        Self {
            title: title.to_string(),
            description: Some(description.to_string()),
            priority,
            duration: Some(duration.to_string()),
            suggested_date: None,
            suggested_time: None,
        }
    }

    pub fn at(mut self, date: Option<NaiveDate>, time: Option<ClockTime>) -> Self {
        self.suggested_date = date;
        self.suggested_time = time;
        self
    }
}

/// Turn a suggestion into a brand new task (with a fresh ID).
///
/// * the date is the suggested one, or `fallback_date`
/// * the start time is the suggested one, or `fallback_time`, or 09:00
/// * a missing or unparsable duration becomes one hour
///
/// This does not check for conflicts: the resulting task should go through [`TaskStore::upsert`](crate::store::TaskStore::upsert) like any other.
pub fn to_task(suggestion: &Suggestion, fallback_date: NaiveDate, fallback_time: Option<ClockTime>) -> Result<Task, TaskError> {
    let date = suggestion.suggested_date.unwrap_or(fallback_date);
    let start_time = match suggestion.suggested_time.or(fallback_time) {
        Some(time) => time,
        None => ClockTime::new(DEFAULT_SUGGESTION_TIME.0, DEFAULT_SUGGESTION_TIME.1)?,
    };
    let duration = TaskDuration::or_default(suggestion.duration.as_deref());

    let mut task = Task::new(suggestion.title.clone(), date, start_time, duration, suggestion.priority)?;
    task.set_description(suggestion.description.clone());
    Ok(task)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
