//! PostgreSQL store tests. Run with `cargo test -- --ignored` and `DATABASE_URL` set.

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use url_shortener::domain::entities::{ClickEvent, NewUrlRecord};
use url_shortener::domain::repositories::UrlStore;
use url_shortener::error::AppError;
use url_shortener::infrastructure::persistence::{PgUrlStore, run_migrations};

fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 10, 15, 0).unwrap()
}

fn new_record(code: &str, url: &str) -> NewUrlRecord {
    NewUrlRecord {
        short_code: code.to_string(),
        original_url: url.to_string(),
        created_at: created_at(),
        expiry_date: created_at() + Duration::minutes(30),
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_create_and_find(pool: PgPool) {
    let store = PgUrlStore::new(Arc::new(pool));

    let record = store
        .create(new_record("test123", "https://example.com"))
        .await
        .unwrap();
    assert_eq!(record.short_code, "test123");
    assert_eq!(record.original_url, "https://example.com");
    assert_eq!(record.created_at, created_at());
    assert!(record.clicks.is_empty());

    let found = store.find_by_code("test123").await.unwrap().unwrap();
    assert_eq!(found, record);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_find_missing_code(pool: PgPool) {
    let store = PgUrlStore::new(Arc::new(pool));

    assert!(store.find_by_code("nope").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_create_duplicate_code(pool: PgPool) {
    let store = PgUrlStore::new(Arc::new(pool));

    store
        .create(new_record("dup1", "https://a.com"))
        .await
        .unwrap();

    let err = store
        .create(new_record("dup1", "https://b.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey { .. }));

    let found = store.find_by_code("dup1").await.unwrap().unwrap();
    assert_eq!(found.original_url, "https://a.com");
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_codes_are_case_sensitive(pool: PgPool) {
    let store = PgUrlStore::new(Arc::new(pool));

    store.create(new_record("AbC", "https://a.com")).await.unwrap();
    store.create(new_record("abc", "https://b.com")).await.unwrap();

    let upper = store.find_by_code("AbC").await.unwrap().unwrap();
    assert_eq!(upper.original_url, "https://a.com");
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_append_click_keeps_order(pool: PgPool) {
    let store = PgUrlStore::new(Arc::new(pool));
    store
        .create(new_record("clk1", "https://example.com"))
        .await
        .unwrap();

    let first = ClickEvent::new(
        created_at() + Duration::seconds(1),
        Some("https://ref.example/".to_string()),
        "US, Boston".to_string(),
    );
    let second = ClickEvent::new(created_at() + Duration::seconds(2), None, "Unknown".to_string());

    store.append_click("clk1", first.clone()).await.unwrap();
    store.append_click("clk1", second.clone()).await.unwrap();

    let record = store.find_by_code("clk1").await.unwrap().unwrap();
    assert_eq!(record.clicks, vec![first, second]);
    assert_eq!(record.clicks[1].referrer, "");
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_append_click_unknown_code(pool: PgPool) {
    let store = PgUrlStore::new(Arc::new(pool));

    let click = ClickEvent::new(created_at(), None, "Unknown".to_string());
    let err = store.append_click("ghost", click).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_list_all_in_insertion_order(pool: PgPool) {
    let store = PgUrlStore::new(Arc::new(pool));

    for code in ["zeta", "alpha", "mid"] {
        store
            .create(new_record(code, "https://example.com"))
            .await
            .unwrap();
    }
    store
        .append_click(
            "alpha",
            ClickEvent::new(created_at(), None, "Unknown".to_string()),
        )
        .await
        .unwrap();

    let records = store.list_all().await.unwrap();
    let codes: Vec<&str> = records.iter().map(|r| r.short_code.as_str()).collect();

    assert_eq!(codes, ["zeta", "alpha", "mid"]);
    assert_eq!(records[1].total_clicks(), 1);
    assert_eq!(records[0].total_clicks(), 0);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_concurrent_clicks_are_all_recorded(pool: PgPool) {
    let store = Arc::new(PgUrlStore::new(Arc::new(pool)));
    store
        .create(new_record("hot1", "https://example.com"))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let click = ClickEvent::new(
                created_at() + Duration::seconds(i),
                None,
                "Unknown".to_string(),
            );
            store.append_click("hot1", click).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let record = store.find_by_code("hot1").await.unwrap().unwrap();
    assert_eq!(record.total_clicks(), 20);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_run_migrations_on_fresh_database(pool: PgPool) {
    run_migrations(&pool).await.unwrap();
    // Already applied migrations are skipped.
    run_migrations(&pool).await.unwrap();

    let store = PgUrlStore::new(Arc::new(pool));
    store
        .create(new_record("fresh1", "https://example.com"))
        .await
        .unwrap();

    assert!(store.find_by_code("fresh1").await.unwrap().is_some());
}
