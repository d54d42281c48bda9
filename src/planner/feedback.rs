//! Utilities to track the progression of a suggestion request

use std::fmt::{Display, Error, Formatter};

/// An event that happens while suggestions are requested
#[derive(Clone, Debug, PartialEq)]
pub enum SuggestionEvent {
    /// No request has been made yet
    Idle,
    /// A request is in progress. A front-end usually shows a pending indicator meanwhile
    Pending { prompt: String },
    /// The request succeeded
    Ready { count: usize },
    /// The request failed. Nothing has been changed
    Failed { details: String },
}

impl SuggestionEvent {
    pub fn is_pending(&self) -> bool {
        match self {
            SuggestionEvent::Pending { .. } => true,
            _ => false,
        }
    }
}

impl Display for SuggestionEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            SuggestionEvent::Idle => write!(f, "Idle"),
            SuggestionEvent::Pending{prompt} => write!(f, "Getting suggestions for {:?}...", prompt),
            SuggestionEvent::Ready{count} => write!(f, "Got {} suggestions", count),
            SuggestionEvent::Failed{details} => write!(f, "Unable to get suggestions: {}", details),
        }
    }
}

impl Default for SuggestionEvent {
    fn default() -> Self {
        Self::Idle
    }
}



/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<SuggestionEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<SuggestionEvent>;

/// Create a feedback channel, that can be used to retrieve the current state of suggestion requests
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(SuggestionEvent::default())
}
