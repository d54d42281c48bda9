//! Some utility functions

use crate::task::Task;
use crate::view::{display_hours, Buckets, DateRange, Slot};

/// A debug utility that pretty-prints a single task
pub fn print_task(task: &Task) {
    let marker = match task.priority() {
        crate::Priority::High => "!!!",
        crate::Priority::Medium => "!! ",
        crate::Priority::Low => "!  ",
    };
    println!("    {} {}-{} {}\t{}", marker, task.start_time(), task.end_time_label(), task.title(), task.id());
}

/// A debug utility that pretty-prints the tasks of a range, day by day and hour by hour
pub fn print_buckets(range: &DateRange, buckets: &Buckets<'_>) {
    for date in range.days() {
        println!("{}", date.format("%a %b %e"));
        for hour in display_hours(crate::config::first_display_hour()) {
            if let Some(tasks) = buckets.get(&Slot { date, hour }) {
                for task in tasks {
                    print_task(task);
                }
            }
        }
    }
}
