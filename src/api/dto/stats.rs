//! DTOs for URL statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{ClickEvent, UrlRecord};

/// Statistics for one short URL, including every click.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlStatsResponse {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub total_clicks: usize,
    pub clicks: Vec<ClickInfo>,
}

/// Individual click event information.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub timestamp: DateTime<Utc>,
    pub referrer: String,
    pub geo: String,
}

impl From<ClickEvent> for ClickInfo {
    fn from(click: ClickEvent) -> Self {
        Self {
            timestamp: click.timestamp,
            referrer: click.referrer,
            geo: click.geo,
        }
    }
}

impl From<UrlRecord> for UrlStatsResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            total_clicks: record.total_clicks(),
            original_url: record.original_url,
            short_code: record.short_code,
            created_at: record.created_at,
            expiry_date: record.expiry_date,
            clicks: record.clicks.into_iter().map(ClickInfo::from).collect(),
        }
    }
}
