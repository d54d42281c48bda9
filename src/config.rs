//! Support for library configuration options

use std::sync::{Arc, Mutex};

use chrono::Weekday;
use once_cell::sync::Lazy;

/// The first day of displayed weeks.
/// Feel free to override it when initing this library.
pub static WEEK_START: Lazy<Arc<Mutex<Weekday>>> = Lazy::new(|| Arc::new(Mutex::new(Weekday::Sun)));

/// The hour displayed at the top of a day column (earlier hours are displayed at the bottom).
/// Feel free to override it when initing this library.
pub static FIRST_DISPLAY_HOUR: Lazy<Arc<Mutex<u32>>> = Lazy::new(|| Arc::new(Mutex::new(7)));

/// The URL used by [`HttpSuggestionSource::from_config`](crate::client::HttpSuggestionSource::from_config).
/// Feel free to override it when initing this library.
pub static SUGGESTION_ENDPOINT: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("http://localhost:3000/api/composio-ai".to_string())));

// Settings are written in one go, so a poisoned lock still holds a usable value

pub fn week_start() -> Weekday {
    match WEEK_START.lock() {
        Ok(guard) => *guard,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

pub fn first_display_hour() -> u32 {
    let hour = match FIRST_DISPLAY_HOUR.lock() {
        Ok(guard) => *guard,
        Err(poisoned) => *poisoned.into_inner(),
    };
    hour % 24
}

pub fn suggestion_endpoint() -> String {
    match SUGGESTION_ENDPOINT.lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
