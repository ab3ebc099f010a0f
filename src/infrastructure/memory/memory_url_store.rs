//! DashMap-backed implementation of the URL store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::domain::entities::{ClickEvent, NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlStore;
use crate::error::AppError;

struct StoredRecord {
    seq: u64,
    record: UrlRecord,
}

/// Keeps every record in process memory.
///
/// Uniqueness is enforced by the map's entry API and clicks are pushed under
/// the shard's write lock, so both hold across concurrent tasks. Data does
/// not survive a restart.
#[derive(Default)]
pub struct MemoryUrlStore {
    records: DashMap<String, StoredRecord>,
    next_seq: AtomicU64,
}

impl MemoryUrlStore {
    pub fn new() -> Self {
        debug!("Using in-memory URL store");
        Self::default()
    }
}

#[async_trait]
impl UrlStore for MemoryUrlStore {
    async fn create(&self, record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        match self.records.entry(record.short_code.clone()) {
            Entry::Occupied(_) => Err(AppError::duplicate_key(
                "Short code already exists",
                json!({ "code": record.short_code }),
            )),
            Entry::Vacant(slot) => {
                let record = UrlRecord::from(record);
                slot.insert(StoredRecord {
                    seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                    record: record.clone(),
                });
                Ok(record)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.records.get(code).map(|stored| stored.record.clone()))
    }

    async fn list_all(&self) -> Result<Vec<UrlRecord>, AppError> {
        let mut entries: Vec<(u64, UrlRecord)> = self
            .records
            .iter()
            .map(|stored| (stored.seq, stored.record.clone()))
            .collect();

        entries.sort_by_key(|(seq, _)| *seq);

        Ok(entries.into_iter().map(|(_, record)| record).collect())
    }

    async fn append_click(&self, code: &str, click: ClickEvent) -> Result<(), AppError> {
        match self.records.get_mut(code) {
            Some(mut stored) => {
                stored.record.clicks.push(click);
                Ok(())
            }
            None => Err(AppError::not_found(
                "URL not found",
                json!({ "code": code }),
            )),
        }
    }
}
