//! Projection of tasks onto a time grid
//!
//! The grid has one column per day and one row per hour. Each cell (a [`Slot`]) lists the tasks that start in it,
//! ordered the way they should be stacked: earliest first, and for equal start times, highest priority first.
//! The first task of a slot is the one drawn on top.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::task::Task;


/// A cell of the time grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub hour: u32,
}

/// Tasks grouped by the slot they start in
pub type Buckets<'a> = BTreeMap<Slot, Vec<&'a Task>>;


/// An inclusive range of days
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range. Bounds are swapped if needed
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    /// The week (seven days) that contains `date`
    pub fn week_of(date: NaiveDate, week_start: Weekday) -> Self {
        let start = start_of_week(date, week_start);
        Self { start, end: end_of_week(start) }
    }

    /// Whole weeks covering the month of `date`, as displayed by a month calendar.
    ///
    /// It starts on the first day of the week containing the 1st of the month, and ends on the last day of the week containing the last day of the month.
    pub fn month_grid(date: NaiveDate, week_start: Weekday) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let last = last_day_of_month(date);
        Self {
            start: start_of_week(first, week_start),
            end: end_of_week(start_of_week(last, week_start)),
        }
    }

    pub fn start(&self) -> NaiveDate { self.start }
    pub fn end(&self) -> NaiveDate   { self.end   }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in this range
    pub fn len(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    /// Every day of this range, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.len() as i64).filter_map(move |offset| start.checked_add_signed(Duration::days(offset)))
    }

    /// The same range, moved by `weeks` weeks (possibly negative).
    /// A range that would leave the supported calendar is returned unchanged
    pub fn shift_weeks(&self, weeks: i64) -> Self {
        let offset = Duration::weeks(weeks);
        match (self.start.checked_add_signed(offset), self.end.checked_add_signed(offset)) {
            (Some(start), Some(end)) => Self { start, end },
            _ => *self,
        }
    }
}

fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let days_since_start = (7 + date.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    date.checked_sub_signed(Duration::days(days_since_start as i64))
        .unwrap_or(NaiveDate::MIN)
}

fn end_of_week(start: NaiveDate) -> NaiveDate {
    start.checked_add_signed(Duration::days(6))
        .unwrap_or(NaiveDate::MAX)
}

pub(crate) fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}


/// Group the tasks of `range` by the slot they start in.
///
/// Only non-empty slots are present in the result. Within a slot, tasks are sorted by start time, then by descending priority.
pub fn bucket<'a, I>(tasks: I, range: &DateRange) -> Buckets<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut buckets: Buckets<'a> = BTreeMap::new();
    for task in tasks {
        if range.contains(task.date()) == false {
            continue;
        }
        let slot = Slot { date: task.date(), hour: task.start_time().hour() };
        buckets.entry(slot).or_default().push(task);
    }

    for tasks in buckets.values_mut() {
        tasks.sort_by_key(|task| (task.start_minutes(), Reverse(task.priority())));
    }
    buckets
}

/// The tasks of a single slot, in stacking order
pub fn tasks_in_slot<'a, I>(tasks: I, slot: Slot) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let day = DateRange::new(slot.date, slot.date);
    bucket(tasks, &day).remove(&slot).unwrap_or_default()
}

/// The 24 hours of a day, in the order they are displayed (starting at `first_hour`, and wrapping around midnight)
pub fn display_hours(first_hour: u32) -> Vec<u32> {
    (0..24).map(|i| (i + first_hour) % 24).collect()
}
