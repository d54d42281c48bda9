//! A suggestion source that returns canned data, and ways to make it fail on purpose during tests

use std::error::Error;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::priority::Priority;
use crate::suggestion::Suggestion;
use crate::traits::SuggestionSource;


/// This stores some behaviour tweaks, that describe how a mocked source will behave during a given test
///
/// So that `suggest` fails _n_ times after _m_ initial successes, set `suggest_behaviour` to `(m, n)`
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every call will be allowed
    pub is_suspended: bool,

    pub suggest_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            suggest_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_suggest(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.suggest_behaviour, "suggest")
    }
}

/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), Box<dyn Error>> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else {
        if remaining_failures > 0 {
            value.1 = value.1 - 1;
            log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
            Err(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value).into())
        } else {
            log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
            Ok(())
        }
    }
}


/// A [`SuggestionSource`] that always proposes the same two tasks
#[derive(Debug)]
pub struct MockSuggestionSource {
    today: NaiveDate,
    behaviour: Mutex<MockBehaviour>,
}

impl MockSuggestionSource {
    /// Create a mock source. Dated suggestions will be for `today`
    pub fn new(today: NaiveDate) -> Self {
        Self::with_behaviour(today, MockBehaviour::new())
    }

    pub fn with_behaviour(today: NaiveDate, behaviour: MockBehaviour) -> Self {
        Self { today, behaviour: Mutex::new(behaviour) }
    }

    /// The suggestions this mock returns for any non-empty prompt
    pub fn canned_suggestions(&self) -> Vec<Suggestion> {
        vec![
            Suggestion::new(
                "Team Communication Workshop",
                "Organize a workshop to improve team communication skills",
                Priority::High,
                "2 hours",
            ).at(Some(self.today), "14:00".parse().ok()),
            Suggestion::new(
                "Daily Stand-up Meeting",
                "Implement daily stand-up meetings to enhance team coordination",
                Priority::Medium,
                "30 min",
            ).at(None, "09:30".parse().ok()),
        ]
    }
}

#[async_trait]
impl SuggestionSource for MockSuggestionSource {
    async fn suggest(&self, prompt: &str) -> Result<Vec<Suggestion>, Box<dyn Error>> {
        match self.behaviour.lock() {
            Err(_) => return Err("Mock behaviour lock is poisoned".into()),
            Ok(mut behaviour) => behaviour.can_suggest()?,
        }

        if prompt.trim().is_empty() {
            return Err("Prompt is required".into());
        }
        Ok(self.canned_suggestions())
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        assert!(ok.can_suggest().is_ok());
        assert!(ok.can_suggest().is_ok());
        assert!(ok.can_suggest().is_ok());

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_suggest().is_err());
        assert!(now.can_suggest().is_err());
        assert!(now.can_suggest().is_ok());
        assert!(now.can_suggest().is_ok());

        let mut custom = MockBehaviour{
            suggest_behaviour: (1,2),
            ..MockBehaviour::default()
        };
        assert!(custom.can_suggest().is_ok());
        assert!(custom.can_suggest().is_err());
        custom.suspend();
        assert!(custom.can_suggest().is_ok());
        custom.resume();
        assert!(custom.can_suggest().is_err());
        assert!(custom.can_suggest().is_ok());
    }

    #[tokio::test]
    async fn test_canned_suggestions() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
        let source = MockSuggestionSource::new(today);

        let suggestions = source.suggest("improve team communication").await.unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].suggested_date, Some(today));
        assert_eq!(suggestions[0].suggested_time, "14:00".parse().ok());
        assert_eq!(suggestions[1].suggested_date, None);
        assert_eq!(suggestions[1].priority, Priority::Medium);

        assert!(source.suggest("   ").await.is_err());
    }
}
