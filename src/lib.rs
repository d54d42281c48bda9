//! This crate provides the scheduling model of a weekly calendar.
//!
//! Tasks live in a [`TaskStore`](store::TaskStore). New tasks are checked against the existing ones by the [`conflict`] module:
//! a task that overlaps another task of higher-or-equal priority is refused, while edits and drag-and-drop moves are always accepted.
//!
//! The [`view`] module groups tasks into the cells (day and hour) of a calendar grid, in stacking order.
//!
//! Tasks can also be proposed by a [`SuggestionSource`](traits::SuggestionSource), either a remote service (see the [`client`] module) or a mock (see the [`mock`] module). \
//! A [`Planner`] combines all of these into a calendar session.

pub mod traits;
pub mod error;
pub mod config;

mod priority;
pub use priority::Priority;
pub mod duration;
pub use duration::TaskDuration;
pub mod clock;
pub use clock::ClockTime;
mod task;
pub use task::{Task, TaskId};
mod notice;
pub use notice::{Notice, NoticeLevel};

pub mod conflict;
pub mod store;
pub use store::TaskStore;
pub mod view;
pub mod suggestion;
pub use suggestion::Suggestion;

pub mod planner;
pub use planner::Planner;

pub mod client;
pub mod mock;
pub mod utils;
