//! This module provides the in-memory task store
//!
//! The store is the single source of truth for the tasks of a session.
//! It keeps tasks in insertion order, and consumers sort them on read (see the [`view`](crate::view) module).

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::conflict::{resolve_submission, Resolution};
use crate::error::TimeError;
use crate::notice::Notice;
use crate::task::{Task, TaskId};


/// A store that can be shared between threads.
///
/// Checking a submission then appending it is not atomic: the lock must be held for the whole [`TaskStore::upsert`] call.
pub type SharedTaskStore = Arc<Mutex<TaskStore>>;


/// What happened to a task passed to [`TaskStore::upsert`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new task has been added, without any conflict
    Added,
    /// A new task has been added, and overlaps these lower-priority tasks
    AddedOverlapping { overlapping: Vec<TaskId> },
    /// An existing task has been replaced by its new version
    Replaced,
    /// A new task has been refused because of this higher-or-equal priority task. The store has not changed
    Rejected { blocking: TaskId },
}

impl UpsertOutcome {
    pub fn is_accepted(&self) -> bool {
        match self {
            UpsertOutcome::Rejected { .. } => false,
            _ => true,
        }
    }

    /// The notification to show the user
    pub fn notice(&self) -> Notice {
        match self {
            UpsertOutcome::Added => Notice::info("Task Added", "Your new task has been successfully added to the calendar."),
            UpsertOutcome::AddedOverlapping { .. } => Notice::info("Task Added", "Your higher priority task has been added and will overlap with existing tasks."),
            UpsertOutcome::Replaced => Notice::info("Task Updated", "Your changes have been saved."),
            UpsertOutcome::Rejected { .. } => Notice::warning("Warning", "A higher or equal priority task already exists at this time."),
        }
    }
}


/// An in-memory, single-writer collection of tasks
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap this store so that it can be shared
    pub fn into_shared(self) -> SharedTaskStore {
        Arc::new(Mutex::new(self))
    }

    /// Add a new task, or replace an existing one.
    ///
    /// * If a task with the same ID exists, it is replaced in place. Edits are never checked for conflicts.
    /// * Otherwise, the task is only added if it wins against every task it overlaps (see [`resolve_submission`]).
    pub fn upsert(&mut self, task: Task) -> UpsertOutcome {
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.id() == task.id()) {
            log::debug!("Replacing task {}", task.id());
            *existing = task;
            return UpsertOutcome::Replaced;
        }

        match resolve_submission(&self.tasks, &task) {
            Resolution::Reject { blocking } => {
                log::warn!("Refusing task {} ({:?}): task {} already holds this time slot", task.id(), task.title(), blocking);
                UpsertOutcome::Rejected { blocking }
            },
            Resolution::Accept { overlapping } => {
                log::debug!("Adding task {} ({:?})", task.id(), task.title());
                self.tasks.push(task);
                if overlapping.is_empty() {
                    UpsertOutcome::Added
                } else {
                    UpsertOutcome::AddedOverlapping { overlapping }
                }
            },
        }
    }

    /// Delete a task. Unknown IDs are silently ignored
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id() == id)?;
        log::debug!("Removing task {}", id);
        Some(self.tasks.remove(index))
    }

    /// Move a task to another day and hour, keeping its minutes (e.g. 09:45 dropped at 14h becomes 14:45).
    ///
    /// Like an edit, this is never refused because of a conflict.
    /// Returns `Ok(false)` if there is no such task.
    pub fn move_by_drag(&mut self, id: &TaskId, new_date: NaiveDate, new_hour: u32) -> Result<bool, TimeError> {
        let mut moved = match self.get(id) {
            None => {
                log::debug!("Ignoring a move of unknown task {}", id);
                return Ok(false);
            },
            Some(task) => task.clone(),
        };

        let new_start = moved.start_time().with_hour(new_hour)?;
        moved.set_date(new_date);
        moved.set_start_time(new_start);
        self.upsert(moved);
        Ok(true)
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    /// All tasks, in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The tasks of a given day, in insertion order
    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.date() == date).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
