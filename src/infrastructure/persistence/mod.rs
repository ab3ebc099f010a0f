//! PostgreSQL store implementation.
//!
//! Uses SQLx runtime-checked queries; the schema lives in `migrations/`.

pub mod pg_url_store;

pub use pg_url_store::PgUrlStore;

use sqlx::PgPool;
use sqlx::migrate::MigrateError;

/// Applies the embedded `migrations/` to the database. Already applied
/// migrations are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
