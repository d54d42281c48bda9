//! Time-slot conflicts between tasks, and how they are settled
//!
//! Two tasks conflict when they happen on the same day and their `[start, end)` intervals share some time.
//! Back-to-back tasks (one ends exactly when the other starts) never conflict.
//!
//! When a new task conflicts with existing ones, priorities decide: the new task is only accepted if it beats
//! every task it overlaps. Nothing is ever evicted to make room: once accepted, overlapping tasks coexist.

use std::cmp::Reverse;

use crate::task::{Task, TaskId};


/// Whether two tasks overlap in time, on the same calendar day
pub fn overlaps(a: &Task, b: &Task) -> bool {
    if a.date() != b.date() {
        return false;
    }

    let (a_start, a_end) = (a.start_minutes(), a.end_minutes());
    let (b_start, b_end) = (b.start_minutes(), b.end_minutes());

    // Back-to-back scheduling is always allowed
    if a_end == b_start || b_end == a_start {
        return false;
    }

    a_start < b_end && b_start < a_end
}

/// Returns the tasks of `existing` that overlap `incoming`
pub fn conflicts_with<'a>(existing: &'a [Task], incoming: &Task) -> Vec<&'a Task> {
    existing.iter()
        .filter(|task| overlaps(task, incoming))
        .collect()
}


/// The verdict for a newly submitted task
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The task can be added. It will overlap the listed tasks (if any)
    Accept { overlapping: Vec<TaskId> },
    /// An existing task with a higher-or-equal priority holds this slot
    Reject { blocking: TaskId },
}

impl Resolution {
    pub fn is_accepted(&self) -> bool {
        match self {
            Resolution::Accept { .. } => true,
            Resolution::Reject { .. } => false,
        }
    }
}

/// Decide whether `incoming` can be added next to the `existing` tasks.
///
/// `incoming` is only compared to `existing`. It should not be part of it (edits of existing tasks are never checked for conflicts).
pub fn resolve_submission(existing: &[Task], incoming: &Task) -> Resolution {
    let conflicts = conflicts_with(existing, incoming);

    let strongest = match strongest_conflict(&conflicts) {
        None => return Resolution::Accept { overlapping: Vec::new() },
        Some(task) => task,
    };

    if incoming.priority() <= strongest.priority() {
        log::debug!("{} ({}) is blocked by {} ({})", incoming.id(), incoming.priority(), strongest.id(), strongest.priority());
        return Resolution::Reject { blocking: strongest.id().clone() };
    }

    Resolution::Accept {
        overlapping: conflicts.iter().map(|task| task.id().clone()).collect(),
    }
}

/// The conflicting task with the highest priority.
///
/// Ties go to the earliest start time, then to the smallest ID, so that the result does not depend on the order of the store.
fn strongest_conflict<'a>(conflicts: &[&'a Task]) -> Option<&'a Task> {
    conflicts.iter()
        .copied()
        .max_by_key(|task| (task.priority(), Reverse(task.start_minutes()), Reverse(task.id().clone())))
}
