//! URL record entity representing a shortening mapping.

use chrono::{DateTime, Utc};

use super::ClickEvent;

/// A short code mapped to an original URL, plus every recorded visit.
///
/// `short_code` never changes after creation and `clicks` is append-only in
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub clicks: Vec<ClickEvent>,
}

impl UrlRecord {
    pub fn total_clicks(&self) -> usize {
        self.clicks.len()
    }

    /// Returns true once `now` is strictly past the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry_date
    }
}

/// Input data for storing a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
}

impl From<NewUrlRecord> for UrlRecord {
    fn from(new: NewUrlRecord) -> Self {
        Self {
            original_url: new.original_url,
            short_code: new.short_code,
            created_at: new.created_at,
            expiry_date: new.expiry_date,
            clicks: Vec::new(),
        }
    }
}
