//! Calendar tasks

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::duration::TaskDuration;
use crate::error::TaskError;
use crate::priority::Priority;


/// An opaque identifier for a task.
///
/// It is assigned when the task is created, and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    /// Generate a random TaskId.
    pub fn random() -> Self {
        let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}
impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}
impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}


/// A task, scheduled at a given time of a given day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTask")]
pub struct Task {
    /// Unique within a store
    id: TaskId,
    /// The display name of the task. Never empty
    title: String,
    /// The day this task happens
    date: NaiveDate,
    /// When this task starts. Tasks do not overflow to the next day, even if they end past midnight
    start_time: ClockTime,
    duration: TaskDuration,
    priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Task {
    /// Create a brand new Task.
    /// This will pick a new (random) task ID.
    pub fn new(title: String, date: NaiveDate, start_time: ClockTime, duration: TaskDuration, priority: Priority) -> Result<Self, TaskError> {
        Self::new_with_id(TaskId::random(), title, date, start_time, duration, priority)
    }

    /// Create a Task with a known ID (e.g. the edited version of an existing task)
    pub fn new_with_id(id: TaskId, title: String, date: NaiveDate, start_time: ClockTime,
                       duration: TaskDuration, priority: Priority,
                    ) -> Result<Self, TaskError>
    {
        check_title(&title)?;
        Ok(Self {
            id,
            title,
            date,
            start_time,
            duration,
            priority,
            description: None,
        })
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.set_description(Some(description));
        self
    }

    pub fn id(&self) -> &TaskId                 { &self.id          }
    pub fn title(&self) -> &str                 { &self.title       }
    pub fn date(&self) -> NaiveDate             { self.date         }
    pub fn start_time(&self) -> ClockTime       { self.start_time   }
    pub fn duration(&self) -> TaskDuration      { self.duration     }
    pub fn priority(&self) -> Priority          { self.priority     }
    pub fn description(&self) -> Option<&str>   { self.description.as_deref() }

    /// Minutes between midnight and the start of this task
    pub fn start_minutes(&self) -> u32 {
        self.start_time.minutes_since_midnight()
    }

    /// Minutes between midnight and the end of this task.
    /// This can exceed a day, since tasks are never carried over to the next date
    pub fn end_minutes(&self) -> u32 {
        self.start_minutes() + self.duration.minutes()
    }

    /// The end time, as displayed on a clock (`HH:MM`)
    pub fn end_time_label(&self) -> String {
        ClockTime::label_for_minutes(self.end_minutes())
    }

    pub fn set_title(&mut self, new_title: String) -> Result<(), TaskError> {
        check_title(&new_title)?;
        self.title = new_title;
        Ok(())
    }

    pub fn set_date(&mut self, new_date: NaiveDate) {
        self.date = new_date;
    }

    pub fn set_start_time(&mut self, new_start_time: ClockTime) {
        self.start_time = new_start_time;
    }

    pub fn set_duration(&mut self, new_duration: TaskDuration) {
        self.duration = new_duration;
    }

    pub fn set_priority(&mut self, new_priority: Priority) {
        self.priority = new_priority;
    }

    /// Set the description. Blank descriptions are stored as no description at all
    pub fn set_description(&mut self, new_description: Option<String>) {
        self.description = new_description.filter(|d| d.trim().is_empty() == false);
    }
}

/// The serialized form of a [`Task`], before its invariants are checked
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    id: TaskId,
    title: String,
    date: NaiveDate,
    start_time: ClockTime,
    duration: TaskDuration,
    priority: Priority,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<RawTask> for Task {
    type Error = TaskError;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        let mut task = Task::new_with_id(raw.id, raw.title, raw.date, raw.start_time, raw.duration, raw.priority)?;
        task.set_description(raw.description);
        Ok(task)
    }
}

fn check_title(title: &str) -> Result<(), TaskError> {
    if title.trim().is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    Ok(())
}
