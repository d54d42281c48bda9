use chrono::Local;

use weekgrid::mock::MockSuggestionSource;
use weekgrid::planner::feedback::feedback_channel;
use weekgrid::{Planner, Priority, Task};


#[tokio::main]
async fn main() {
    env_logger::init();

    let today = Local::now().date_naive();
    let mut planner = Planner::new(MockSuggestionSource::new(today), today);
    let (sender, receiver) = feedback_channel();
    planner.set_feedback_channel(sender);

    let tasks = vec![
        ("Plan the sprint", "09:00", "1 hour", Priority::High),
        ("Answer e-mails", "09:30", "30 min", Priority::Medium),
        ("Lunch with Sam", "10:00", "1.5 hours", Priority::Low),
    ];
    for (title, start, duration, priority) in tasks {
        let task = match build_task(title, today, start, duration, priority) {
            Err(err) => {
                log::error!("Invalid demo task {:?}: {}", title, err);
                continue;
            },
            Ok(task) => task,
        };
        planner.submit(task);
    }

    match planner.request_suggestions("Suggest a task for improving team communication").await {
        Err(err) => log::warn!("No suggestions this time: {}", err),
        Ok(suggestions) => {
            for suggestion in suggestions {
                println!("Suggested: {} ({}, {:?})", suggestion.title, suggestion.priority, suggestion.duration);
            }
        },
    }
    println!("{}", *receiver.borrow());
    if let Err(err) = planner.accept_suggestion(0) {
        log::warn!("Unable to accept the suggestion: {}", err);
    }

    for notice in planner.drain_notices() {
        println!("{}", notice);
    }

    println!("---- week of {} -----", planner.visible_week().start());
    weekgrid::utils::print_buckets(&planner.visible_week(), &planner.week_buckets());
}

fn build_task(title: &str, date: chrono::NaiveDate, start: &str, duration: &str, priority: Priority) -> Result<Task, weekgrid::error::TaskError> {
    Task::new(title.to_string(), date, start.parse()?, duration.parse()?, priority)
}
