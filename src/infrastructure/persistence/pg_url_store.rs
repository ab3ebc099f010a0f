//! PostgreSQL implementation of the URL store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{ClickEvent, NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlStore;
use crate::error::AppError;

/// PostgreSQL store for URL records and click logs.
///
/// Uniqueness comes from the `urls_short_code_key` constraint. Clicks live in
/// `url_clicks` and are appended with a single `INSERT ... SELECT`, so
/// concurrent redirects never overwrite each other.
pub struct PgUrlStore {
    pool: Arc<PgPool>,
}

#[derive(FromRow)]
struct UrlRow {
    id: i64,
    short_code: String,
    original_url: String,
    created_at: DateTime<Utc>,
    expiry_date: DateTime<Utc>,
}

#[derive(FromRow)]
struct ClickRow {
    url_id: i64,
    clicked_at: DateTime<Utc>,
    referrer: String,
    geo: String,
}

impl UrlRow {
    fn into_record(self, clicks: Vec<ClickEvent>) -> UrlRecord {
        UrlRecord {
            original_url: self.original_url,
            short_code: self.short_code,
            created_at: self.created_at,
            expiry_date: self.expiry_date,
            clicks,
        }
    }
}

impl From<ClickRow> for ClickEvent {
    fn from(row: ClickRow) -> Self {
        ClickEvent {
            timestamp: row.clicked_at,
            referrer: row.referrer,
            geo: row.geo,
        }
    }
}

impl PgUrlStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens a read-only snapshot so records and their clicks agree.
    async fn snapshot(&self) -> Result<Transaction<'static, Postgres>, AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }
}

#[async_trait]
impl UrlStore for PgUrlStore {
    async fn create(&self, record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (short_code, original_url, created_at, expiry_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, short_code, original_url, created_at, expiry_date
            "#,
        )
        .bind(&record.short_code)
        .bind(&record.original_url)
        .bind(record.created_at)
        .bind(record.expiry_date)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::DuplicateKey { .. } => AppError::duplicate_key(
                "Short code already exists",
                json!({ "code": record.short_code }),
            ),
            other => other,
        })?;

        Ok(row.into_record(Vec::new()))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let mut tx = self.snapshot().await?;

        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, short_code, original_url, created_at, expiry_date
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.commit().await?;
            return Ok(None);
        };

        let clicks = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT url_id, clicked_at, referrer, geo
            FROM url_clicks
            WHERE url_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(row.id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(
            row.into_record(clicks.into_iter().map(ClickEvent::from).collect()),
        ))
    }

    async fn list_all(&self) -> Result<Vec<UrlRecord>, AppError> {
        let mut tx = self.snapshot().await?;

        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, short_code, original_url, created_at, expiry_date
            FROM urls
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let click_rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT url_id, clicked_at, referrer, geo
            FROM url_clicks
            ORDER BY url_id ASC, id ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut clicks_by_url: HashMap<i64, Vec<ClickEvent>> = HashMap::new();
        for click in click_rows {
            clicks_by_url
                .entry(click.url_id)
                .or_default()
                .push(click.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let clicks = clicks_by_url.remove(&row.id).unwrap_or_default();
                row.into_record(clicks)
            })
            .collect())
    }

    async fn append_click(&self, code: &str, click: ClickEvent) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO url_clicks (url_id, clicked_at, referrer, geo)
            SELECT id, $2, $3, $4
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .bind(click.timestamp)
        .bind(click.referrer)
        .bind(click.geo)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "URL not found",
                json!({ "code": code }),
            ));
        }

        Ok(())
    }
}
