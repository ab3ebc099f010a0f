//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// A visit recorded when a short code is resolved.
///
/// Click events are immutable and belong to exactly one [`super::UrlRecord`].
/// `referrer` and `geo` are empty strings when the information is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    pub referrer: String,
    pub geo: String,
}

impl ClickEvent {
    /// Creates a click event, normalizing a missing referrer to `""`.
    pub fn new(timestamp: DateTime<Utc>, referrer: Option<String>, geo: String) -> Self {
        Self {
            timestamp,
            referrer: referrer.unwrap_or_default(),
            geo,
        }
    }
}
