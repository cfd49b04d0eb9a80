//! Outcome of dispatching a page event.

use url::Url;

/// Result of handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
    /// Event requires loading a new page (linked mode, page-size changes).
    Navigate(Url),
}

impl EventResult {
    /// Check if the event was handled (consumed or navigating).
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }

    /// Navigation target, if any.
    pub fn url(&self) -> Option<&Url> {
        match self {
            EventResult::Navigate(url) => Some(url),
            _ => None,
        }
    }
}
