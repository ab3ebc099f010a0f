//! Store trait for URL records and click logs.

use crate::domain::entities::{ClickEvent, NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable keyed storage of URL records.
///
/// Uniqueness of `short_code` and atomicity of click appends are enforced
/// here, never by callers. Implementations must be safe to share across
/// concurrently running requests.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlStore`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryUrlStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Persists a new record with an empty click log.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateKey`] if the short code already exists.
    /// Returns [`AppError::StoreUnavailable`] on persistence errors.
    async fn create(&self, record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by its short code (case-sensitive), clicks included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on persistence errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Lists every record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on persistence errors.
    async fn list_all(&self) -> Result<Vec<UrlRecord>, AppError>;

    /// Atomically appends one click to the record identified by `code`.
    ///
    /// Concurrent appends to the same code are all kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    /// Returns [`AppError::StoreUnavailable`] on persistence errors.
    async fn append_click(&self, code: &str, click: ClickEvent) -> Result<(), AppError>;
}
