//! Scheduling scenarios, played against a task store then against a whole planner

use chrono::NaiveDate;

use weekgrid::store::UpsertOutcome;
use weekgrid::view::{bucket, DateRange, Slot};
use weekgrid::mock::MockSuggestionSource;
use weekgrid::{Planner, Priority, Task, TaskId, TaskStore};


fn new_year() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn task(id: &str, start: &str, duration: &str, priority: Priority) -> Task {
    Task::new_with_id(
        TaskId::from(id),
        format!("task {}", id),
        new_year(),
        start.parse().unwrap(),
        duration.parse().unwrap(),
        priority,
    ).unwrap()
}

/// A store containing a single high-priority task, from 09:00 to 10:00
fn populate_store() -> TaskStore {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut store = TaskStore::new();
    assert_eq!(store.upsert(task("1", "09:00", "1 hour", Priority::High)), UpsertOutcome::Added);
    store
}

#[test]
fn lower_priority_overlap_is_rejected() {
    let mut store = populate_store();
    let before = store.clone();

    let outcome = store.upsert(task("2", "09:30", "30 min", Priority::Medium));
    assert_eq!(outcome, UpsertOutcome::Rejected { blocking: TaskId::from("1") });
    assert_eq!(outcome.notice().title, "Warning");
    assert_eq!(store, before);
}

#[test]
fn equal_priority_overlap_is_rejected() {
    let mut store = populate_store();
    let before = store.clone();

    let outcome = store.upsert(task("3", "09:30", "30 min", Priority::High));
    assert_eq!(outcome, UpsertOutcome::Rejected { blocking: TaskId::from("1") });
    assert_eq!(store, before);
}

#[test]
fn back_to_back_is_accepted() {
    let mut store = populate_store();

    let outcome = store.upsert(task("4", "10:00", "1 hour", Priority::Low));
    assert_eq!(outcome, UpsertOutcome::Added);
    assert_eq!(store.len(), 2);
}

#[test]
fn higher_priority_overlap_coexists() {
    let mut store = TaskStore::new();
    store.upsert(task("1", "09:00", "1 hour", Priority::Medium));

    let outcome = store.upsert(task("2", "09:30", "1 hour", Priority::High));
    assert_eq!(outcome, UpsertOutcome::AddedOverlapping { overlapping: vec![TaskId::from("1")] });
    assert!(store.contains(&TaskId::from("1")));
    assert!(store.contains(&TaskId::from("2")));

    // Once both are in, a medium task still cannot squeeze in
    let outcome = store.upsert(task("3", "09:45", "15 min", Priority::Medium));
    assert_eq!(outcome, UpsertOutcome::Rejected { blocking: TaskId::from("2") });
}

#[test]
fn same_hour_bucketing() {
    let mut store = TaskStore::new();
    store.upsert(task("late", "09:45", "15 min", Priority::Low));
    store.upsert(task("early", "09:00", "45 min", Priority::Low));

    let day = DateRange::new(new_year(), new_year());
    let buckets = bucket(store.tasks(), &day);
    let nine = &buckets[&Slot { date: new_year(), hour: 9 }];
    let ids: Vec<&str> = nine.iter().map(|t| t.id().as_str()).collect();
    assert_eq!(ids, vec!["early", "late"]);
}

#[tokio::test]
async fn a_planning_session() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut planner = Planner::new(MockSuggestionSource::new(new_year()), new_year());
    planner.submit(task("standup", "09:30", "30 min", Priority::High));
    planner.submit(task("review", "14:00", "1 hour", Priority::Low));

    // The workshop (14:00, 2 hours, high priority) is accepted over the low-priority review
    planner.request_suggestions("how can the team communicate better?").await.unwrap();
    let outcome = planner.accept_suggestion(0).unwrap();
    assert_eq!(outcome, UpsertOutcome::AddedOverlapping { overlapping: vec![TaskId::from("review")] });

    // Drag the review to the next morning, keeping its minutes
    let tomorrow = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    assert_eq!(planner.drag(&TaskId::from("review"), tomorrow, 8), Ok(true));
    let review = planner.store().get(&TaskId::from("review")).unwrap();
    assert_eq!((review.date(), review.start_time().to_string()), (tomorrow, "08:00".to_string()));

    // Drag it back over the workshop: moves are never refused
    assert_eq!(planner.drag(&TaskId::from("review"), new_year(), 14), Ok(true));
    assert_eq!(planner.store().len(), 3);

    let buckets = planner.week_buckets();
    let two_pm: Vec<&str> = buckets[&Slot { date: new_year(), hour: 14 }].iter().map(|t| t.title()).collect();
    assert_eq!(two_pm, vec!["Team Communication Workshop", "task review"]);

    assert!(planner.delete(&TaskId::from("standup")));
    assert!(planner.delete(&TaskId::from("standup")) == false);
    assert_eq!(planner.store().len(), 2);
}
