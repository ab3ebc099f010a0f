//! HTTP server initialization and runtime setup.
//!
//! Picks the store and geolocation backends, wires the service and runs the
//! Axum server until Ctrl+C.

use crate::api::middleware::access::AccessGate;
use crate::application::services::UrlService;
use crate::config::Config;
use crate::domain::clock::SystemClock;
use crate::domain::code_generator::AlphanumericGenerator;
use crate::domain::geo::{GeoLookup, NoGeoLookup};
use crate::domain::repositories::UrlStore;
use crate::infrastructure::geoip::MaxMindGeoLookup;
use crate::infrastructure::memory::MemoryUrlStore;
use crate::infrastructure::persistence::{PgUrlStore, run_migrations};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations (or the in-memory store)
/// - MaxMind geolocation (or a no-op lookup)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;
    let geo = build_geo(&config);

    let url_service = UrlService::new(
        store,
        Arc::new(AlphanumericGenerator),
        Arc::new(SystemClock),
        config.shorten_settings(),
    );

    let state = AppState {
        url_service: Arc::new(url_service),
        geo,
        access_gate: Arc::new(AccessGate::new(&config.access_code)),
        base_url: Arc::from(config.base_url.trim_end_matches('/')),
        behind_proxy: config.behind_proxy,
        cors_origins: config.cors_allowed_origins.clone(),
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn build_store(config: &Config) -> Result<Arc<dyn UrlStore>> {
    let Some(ref database_url) = config.database_url else {
        tracing::warn!("No database configured, using in-memory store (data is not persisted)");
        return Ok(Arc::new(MemoryUrlStore::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_connect_timeout())
        .idle_timeout(config.db_idle_timeout())
        .max_lifetime(config.db_max_lifetime())
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    Ok(Arc::new(PgUrlStore::new(Arc::new(pool))))
}

fn build_geo(config: &Config) -> Arc<dyn GeoLookup> {
    let Some(ref path) = config.geoip_db_path else {
        tracing::info!("GeoIP disabled, click locations will be recorded as unknown");
        return Arc::new(NoGeoLookup);
    };

    match MaxMindGeoLookup::open(path) {
        Ok(lookup) => {
            tracing::info!("GeoIP enabled ({})", path);
            Arc::new(lookup)
        }
        Err(e) => {
            tracing::warn!("Failed to open GeoIP database {}: {}. Geolocation disabled.", path, e);
            Arc::new(NoGeoLookup)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
