//! This module ties a task store, a suggestion source and the calendar navigation into a single session object
//!
//! All mutations go through a [`Planner`], one at a time, and each of them queues a [`Notice`] for the user.

use std::error::Error;

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::error::{PlannerError, TimeError};
use crate::notice::Notice;
use crate::store::{TaskStore, UpsertOutcome};
use crate::suggestion::{to_task, Suggestion};
use crate::task::{Task, TaskId};
use crate::traits::SuggestionSource;
use crate::view::{bucket, last_day_of_month, Buckets, DateRange};

pub mod feedback;
use feedback::{FeedbackSender, SuggestionEvent};


/// A calendar session.
///
/// It owns the tasks, the currently selected date, and the suggestions that are waiting for the user to accept them.
pub struct Planner<S>
where
    S: SuggestionSource,
{
    store: TaskStore,
    selected_date: NaiveDate,

    source: S,
    suggestions: Vec<Suggestion>,

    notices: Vec<Notice>,
    feedback_channel: Option<FeedbackSender>,
}

impl<S> Planner<S>
where
    S: SuggestionSource,
{
    /// Create a planner with an empty store, showing the week of `today`
    pub fn new(source: S, today: NaiveDate) -> Self {
        Self::with_store(source, today, TaskStore::new())
    }

    pub fn with_store(source: S, today: NaiveDate, store: TaskStore) -> Self {
        Self {
            store,
            selected_date: today,
            source,
            suggestions: Vec::new(),
            notices: Vec::new(),
            feedback_channel: None,
        }
    }

    /// Report the progress of suggestion requests to this channel (see [`feedback::feedback_channel`])
    pub fn set_feedback_channel(&mut self, sender: FeedbackSender) {
        self.feedback_channel = Some(sender);
    }

    pub fn store(&self) -> &TaskStore { &self.store }
    pub fn source(&self) -> &S { &self.source }
    pub fn selected_date(&self) -> NaiveDate { self.selected_date }
    /// The suggestions fetched by the last successful [`Self::request_suggestions`], that have not been accepted yet
    pub fn suggestions(&self) -> &[Suggestion] { &self.suggestions }


    /// Create or edit a task (see [`TaskStore::upsert`])
    pub fn submit(&mut self, task: Task) -> UpsertOutcome {
        let outcome = self.store.upsert(task);
        self.notices.push(outcome.notice());
        outcome
    }

    /// Delete a task. Returns whether there was such a task
    pub fn delete(&mut self, id: &TaskId) -> bool {
        match self.store.remove(id) {
            None => false,
            Some(_) => {
                self.notices.push(Notice::task_deleted());
                true
            },
        }
    }

    /// Drop a task onto another cell of the grid (see [`TaskStore::move_by_drag`])
    pub fn drag(&mut self, id: &TaskId, new_date: NaiveDate, new_hour: u32) -> Result<bool, TimeError> {
        self.store.move_by_drag(id, new_date, new_hour)
    }


    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    // Stepping past the supported calendar leaves the selected date unchanged

    pub fn next_week(&mut self) {
        if let Some(date) = self.selected_date.checked_add_signed(Duration::weeks(1)) {
            self.selected_date = date;
        }
    }

    pub fn previous_week(&mut self) {
        if let Some(date) = self.selected_date.checked_sub_signed(Duration::weeks(1)) {
            self.selected_date = date;
        }
    }

    /// Same day of the next month, or its last day if the month is shorter
    pub fn next_month(&mut self) {
        if let Some(date) = self.selected_date.checked_add_months(Months::new(1)) {
            self.selected_date = date;
        }
    }

    /// Same day of the previous month, or its last day if the month is shorter
    pub fn previous_month(&mut self) {
        if let Some(date) = self.selected_date.checked_sub_months(Months::new(1)) {
            self.selected_date = date;
        }
    }

    /// Jump to another month (`1..=12`) of another year, keeping the day of the month when it exists.
    ///
    /// Returns whether there is such a month. If there is not, the selected date does not change.
    pub fn select_month(&mut self, year: i32, month: u32) -> bool {
        let first = match NaiveDate::from_ymd_opt(year, month, 1) {
            None => return false,
            Some(first) => first,
        };
        let day = self.selected_date.day().min(last_day_of_month(first).day());
        match first.with_day(day) {
            None => false,
            Some(date) => {
                self.selected_date = date;
                true
            },
        }
    }

    pub fn jump_to_today(&mut self, today: NaiveDate) {
        self.selected_date = today;
    }

    /// The week that contains the selected date
    pub fn visible_week(&self) -> DateRange {
        DateRange::week_of(self.selected_date, crate::config::week_start())
    }

    /// The weeks of the month that contains the selected date
    pub fn visible_month(&self) -> DateRange {
        DateRange::month_grid(self.selected_date, crate::config::week_start())
    }

    /// The tasks of the visible week, grouped by grid cell
    pub fn week_buckets(&self) -> Buckets<'_> {
        bucket(self.store.tasks(), &self.visible_week())
    }


    /// Ask the suggestion source for tasks matching `prompt`.
    ///
    /// On success, the new suggestions replace the pending ones.
    /// On failure, nothing changes (apart from an error notice), and nothing is retried.
    pub async fn request_suggestions(&mut self, prompt: &str) -> Result<&[Suggestion], Box<dyn Error>> {
        self.feedback(SuggestionEvent::Pending { prompt: prompt.to_string() });

        let result = self.source.suggest(prompt).await;
        match result {
            Err(err) => {
                log::error!("Unable to get suggestions: {}", err);
                self.notices.push(Notice::suggestions_failed());
                self.feedback(SuggestionEvent::Failed { details: err.to_string() });
                Err(err)
            },
            Ok(suggestions) => {
                log::info!("Got {} suggestions", suggestions.len());
                self.feedback(SuggestionEvent::Ready { count: suggestions.len() });
                self.suggestions = suggestions;
                Ok(&self.suggestions)
            },
        }
    }

    /// Turn the `index`-th pending suggestion into a task, and submit it.
    ///
    /// Suggestions without a date are scheduled on the selected date, at their suggested time or at 09:00.
    /// Once a suggestion is accepted, the pending list is cleared. If the task is refused because of a conflict, the list is kept.
    pub fn accept_suggestion(&mut self, index: usize) -> Result<UpsertOutcome, PlannerError> {
        let suggestion = self.suggestions.get(index)
            .ok_or(PlannerError::NoSuchSuggestion(index))?;
        let task = to_task(suggestion, self.selected_date, None)?;

        let outcome = self.submit(task);
        if outcome.is_accepted() {
            self.suggestions.clear();
            self.notices.push(Notice::suggestion_accepted());
        }
        Ok(outcome)
    }

    /// Returns the notices queued since the last call
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Send an event as a feedback to the listener (if any).
    fn feedback(&self, event: SuggestionEvent) {
        if let Some(sender) = &self.feedback_channel {
            // No receiver left is not an error
            let _ = sender.send(event);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBehaviour, MockSuggestionSource};
    use crate::notice::NoticeLevel;
    use crate::priority::Priority;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    fn planner() -> Planner<MockSuggestionSource> {
        Planner::new(MockSuggestionSource::new(today()), today())
    }

    fn task(id: &str, date: NaiveDate, start: &str, priority: Priority) -> Task {
        Task::new_with_id(TaskId::from(id), format!("task {}", id), date, start.parse().unwrap(), Default::default(), priority).unwrap()
    }

    #[test]
    fn navigation() {
        let mut planner = planner();
        assert_eq!(planner.visible_week().start(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        planner.next_week();
        assert_eq!(planner.selected_date(), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        planner.previous_week();
        planner.previous_week();
        assert_eq!(planner.selected_date(), NaiveDate::from_ymd_opt(2023, 12, 27).unwrap());
        planner.jump_to_today(today());
        assert_eq!(planner.selected_date(), today());

        planner.select_date(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
        assert_eq!(planner.visible_month().start(), NaiveDate::from_ymd_opt(2024, 1, 28).unwrap());
    }

    #[test]
    fn month_navigation() {
        let mut planner = planner();
        planner.select_date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        planner.next_month();
        assert_eq!(planner.selected_date(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        planner.next_month();
        assert_eq!(planner.selected_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        planner.select_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        planner.previous_month();
        assert_eq!(planner.selected_date(), NaiveDate::from_ymd_opt(2023, 12, 15).unwrap());
        planner.next_month();
        assert_eq!(planner.selected_date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

        planner.select_date(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert!(planner.select_month(2023, 2));
        assert_eq!(planner.selected_date(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
        assert!(planner.select_month(2024, 12));
        assert_eq!(planner.selected_date(), NaiveDate::from_ymd_opt(2024, 12, 28).unwrap());
        assert!(planner.select_month(2025, 1));
        assert_eq!(planner.selected_date(), NaiveDate::from_ymd_opt(2025, 1, 28).unwrap());

        assert!(planner.select_month(2025, 13) == false);
        assert!(planner.select_month(2025, 0) == false);
        assert_eq!(planner.selected_date(), NaiveDate::from_ymd_opt(2025, 1, 28).unwrap());
    }

    #[test]
    fn navigation_stops_at_the_calendar_bounds() {
        let mut planner = planner();
        planner.select_date(NaiveDate::MAX);
        planner.next_week();
        planner.next_month();
        assert_eq!(planner.selected_date(), NaiveDate::MAX);
        assert_eq!(planner.visible_week().end(), NaiveDate::MAX);
        assert!(planner.week_buckets().is_empty());

        planner.select_date(NaiveDate::MIN);
        planner.previous_week();
        planner.previous_month();
        assert_eq!(planner.selected_date(), NaiveDate::MIN);
        assert_eq!(planner.visible_month().start(), NaiveDate::MIN);
    }

    #[test]
    fn week_buckets_follow_the_selected_week() {
        let mut planner = planner();
        planner.submit(task("1", today(), "09:00", Priority::Low));
        planner.submit(task("2", today() + Duration::weeks(1), "09:00", Priority::Low));
        assert_eq!(planner.week_buckets().len(), 1);

        planner.next_week();
        let buckets = planner.week_buckets();
        assert_eq!(buckets.len(), 1);
        assert!(buckets.values().flatten().all(|t| t.id().as_str() == "2"));
    }

    #[test]
    fn notices() {
        let mut planner = planner();
        planner.submit(task("1", today(), "09:00", Priority::High));
        planner.submit(task("2", today(), "09:30", Priority::High));
        assert!(planner.delete(&TaskId::from("unknown")) == false);
        assert!(planner.delete(&TaskId::from("1")));

        let notices = planner.drain_notices();
        let titles: Vec<&str> = notices.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Task Added", "Warning", "Task Deleted"]);
        assert_eq!(notices[1].level, NoticeLevel::Warning);
        assert!(planner.drain_notices().is_empty());
    }

    #[test]
    fn edits_are_notified() {
        let mut planner = planner();
        planner.submit(task("1", today(), "09:00", Priority::Low));
        planner.drain_notices();

        let mut edited = planner.store().tasks()[0].clone();
        edited.set_title("renamed".to_string()).unwrap();
        assert_eq!(planner.submit(edited), UpsertOutcome::Replaced);

        let notices = planner.drain_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Task Updated");
        assert_eq!(notices[0].level, NoticeLevel::Info);
        assert_eq!(planner.store().tasks()[0].title(), "renamed");

        // Drags are silent
        assert_eq!(planner.drag(&TaskId::from("1"), today(), 11), Ok(true));
        assert!(planner.drain_notices().is_empty());
    }

    #[tokio::test]
    async fn accept_a_suggestion() {
        let mut planner = planner();
        planner.select_date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        planner.request_suggestions("team communication").await.unwrap();
        assert_eq!(planner.suggestions().len(), 2);

        // The stand-up has no date, it goes to the selected day
        let outcome = planner.accept_suggestion(1).unwrap();
        assert_eq!(outcome, UpsertOutcome::Added);
        assert!(planner.suggestions().is_empty());

        let task = &planner.store().tasks()[0];
        assert_eq!(task.date(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(task.start_time().to_string(), "09:30");
        assert_eq!(task.duration().minutes(), 30);

        let notices = planner.drain_notices();
        let titles: Vec<&str> = notices.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Task Added", "Task Created"]);
        assert_eq!(notices[1], Notice::suggestion_accepted());

        assert_eq!(planner.accept_suggestion(0), Err(PlannerError::NoSuchSuggestion(0)));
    }

    #[tokio::test]
    async fn refused_suggestions_stay_pending() {
        let mut planner = planner();
        planner.submit(task("busy", today(), "14:30", Priority::High));
        planner.request_suggestions("workshop").await.unwrap();

        // The workshop (14:00, 2 hours, high) overlaps a high-priority task
        let outcome = planner.accept_suggestion(0).unwrap();
        assert_eq!(outcome, UpsertOutcome::Rejected { blocking: TaskId::from("busy") });
        assert_eq!(planner.suggestions().len(), 2);
        assert_eq!(planner.store().len(), 1);
    }

    /// A source that records the feedback state it observes while it is being queried
    struct WatchingSource {
        receiver: feedback::FeedbackReceiver,
        seen: std::sync::Mutex<Option<SuggestionEvent>>,
    }

    #[async_trait::async_trait]
    impl SuggestionSource for WatchingSource {
        async fn suggest(&self, _prompt: &str) -> Result<Vec<Suggestion>, Box<dyn Error>> {
            let current = self.receiver.borrow().clone();
            *self.seen.lock().unwrap() = Some(current);
            Ok(vec![Suggestion::new("Read", "", Priority::Low, "30 min")])
        }
    }

    #[tokio::test]
    async fn requests_are_pending_while_the_source_works() {
        let (sender, receiver) = feedback::feedback_channel();
        let source = WatchingSource { receiver: receiver.clone(), seen: std::sync::Mutex::new(None) };
        let mut planner = Planner::new(source, today());
        planner.set_feedback_channel(sender);
        assert!(receiver.borrow().is_pending() == false);

        planner.request_suggestions("books").await.unwrap();

        let seen = planner.source().seen.lock().unwrap().clone().unwrap();
        assert!(seen.is_pending());
        assert_eq!(seen, SuggestionEvent::Pending { prompt: "books".to_string() });
        assert!(receiver.borrow().is_pending() == false);
        assert_eq!(*receiver.borrow(), SuggestionEvent::Ready { count: 1 });
    }

    #[tokio::test]
    async fn failed_requests_change_nothing() {
        let source = MockSuggestionSource::with_behaviour(today(), MockBehaviour { suggest_behaviour: (1, 1), ..MockBehaviour::default() });
        let mut planner = Planner::new(source, today());
        let (sender, receiver) = feedback::feedback_channel();
        planner.set_feedback_channel(sender);

        planner.request_suggestions("first").await.unwrap();
        assert_eq!(*receiver.borrow(), SuggestionEvent::Ready { count: 2 });
        planner.drain_notices();

        assert!(planner.request_suggestions("second").await.is_err());
        assert_eq!(planner.suggestions().len(), 2);
        assert!(planner.store().is_empty());
        assert!(matches!(*receiver.borrow(), SuggestionEvent::Failed { .. }));

        let notices = planner.drain_notices();
        assert_eq!(notices, vec![Notice::suggestions_failed()]);
    }
}
