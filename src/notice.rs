//! User-visible signals
//!
//! Every mutation of a planner produces a short notification, that a front-end typically displays as a toast.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    /// Something the user asked for has not been done (e.g. a task has been refused because of a conflict)
    Warning,
    /// Something failed (e.g. a remote service could not be reached)
    Error,
}

/// A notification intended for the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: &str, description: &str) -> Self {
        Self::new(NoticeLevel::Info, title, description)
    }

    pub fn warning(title: &str, description: &str) -> Self {
        Self::new(NoticeLevel::Warning, title, description)
    }

    pub fn error(title: &str, description: &str) -> Self {
        Self::new(NoticeLevel::Error, title, description)
    }

    fn new(level: NoticeLevel, title: &str, description: &str) -> Self {
        Self { level, title: title.to_string(), description: description.to_string() }
    }

    pub fn task_deleted() -> Self {
        Self::info("Task Deleted", "The task has been removed from your calendar.")
    }

    pub fn suggestion_accepted() -> Self {
        Self::info("Task Created", "AI suggestion has been added to your calendar.")
    }

    pub fn suggestions_failed() -> Self {
        Self::error("Error", "Failed to get AI suggestions. Please try again.")
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let marker = match self.level {
            NoticeLevel::Info => "i",
            NoticeLevel::Warning => "!",
            NoticeLevel::Error => "x",
        };
        write!(f, "[{}] {}: {}", marker, self.title, self.description)
    }
}
