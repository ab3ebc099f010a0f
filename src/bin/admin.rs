//! CLI administration tool for url-shortener.
//!
//! Creates short links and inspects statistics straight against the
//! database, without going through the HTTP API or its access code.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (30 minute validity by default)
//! cargo run --bin admin -- shorten https://example.com/some/long/path
//!
//! # Custom code and validity
//! cargo run --bin admin -- shorten https://example.com --code promo42 --validity 1440
//!
//! # Statistics for every link, or a single one
//! cargo run --bin admin -- stats
//! cargo run --bin admin -- stats promo42
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `BASE_URL` (optional): Prefix for printed short links
//!
//! `shorten` and `stats` apply pending migrations first, so they work
//! against a fresh database.

use url_shortener::application::services::{ShortenRequest, UrlService};
use url_shortener::domain::entities::UrlRecord;
use url_shortener::infrastructure::persistence::{PgUrlStore, run_migrations};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// URL to shorten
        url: String,

        /// Validity in minutes
        #[arg(short, long)]
        validity: Option<i64>,

        /// Custom short code (alphanumeric, auto-generated if not provided)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Show link statistics
    Stats {
        /// Short code to inspect (all links if omitted)
        code: Option<String>,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let base_url = std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Shorten {
            url,
            validity,
            code,
        } => {
            let service = url_service(&pool).await?;
            shorten(&service, &base_url, url, validity, code).await?
        }
        Commands::Stats { code } => {
            let service = url_service(&pool).await?;
            handle_stats(&service, code).await?
        }
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Brings the schema up to date, then builds the service over the pool.
async fn url_service(pool: &PgPool) -> Result<UrlService> {
    run_migrations(pool)
        .await
        .context("Failed to run migrations")?;

    Ok(UrlService::with_store(Arc::new(PgUrlStore::new(Arc::new(
        pool.clone(),
    )))))
}

/// Creates a short link and prints it.
async fn shorten(
    service: &UrlService,
    base_url: &str,
    url: String,
    validity: Option<i64>,
    code: Option<String>,
) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    let mut request = ShortenRequest::new(url);
    if let Some(minutes) = validity {
        request = request.with_validity(minutes);
    }
    if let Some(code) = code {
        request = request.with_code(code);
    }

    let created = service
        .shorten(request)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    let short_link = format!("{}/{}", base_url.trim_end_matches('/'), created.short_code);

    println!("{}", "✅ Short link created".green().bold());
    println!("  Link:    {}", short_link.bright_yellow().bold());
    println!(
        "  Expires: {}",
        created
            .expiry_date
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .cyan()
    );
    println!();

    Ok(())
}

/// Displays statistics for one link or a summary table of all links.
///
/// # Output Format
///
/// ```text
/// 📊 Statistics
///
///   Code       Clicks  Expires              URL
///   ──────────────────────────────────────────────────────────────────────
///   abc123     12      2026-01-15 10:30     https://example.com/
/// ```
async fn handle_stats(service: &UrlService, code: Option<String>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    if let Some(code) = code {
        let record = service
            .get_stats(&code)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;
        print_record(&record);
        return Ok(());
    }

    let records = service
        .list_stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin shorten <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<10} {:<7} {:<20} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Expires".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    let now = Utc::now();
    for record in &records {
        let expires = record
            .expiry_date
            .format("%Y-%m-%d %H:%M")
            .to_string();
        let expires = if record.is_expired_at(now) {
            expires.red()
        } else {
            expires.bright_black()
        };

        println!(
            "  {:<10} {:<7} {:<20} {}",
            record.short_code.cyan(),
            record.total_clicks().to_string().bright_green(),
            expires,
            record.original_url
        );
    }

    let total_clicks: usize = records.iter().map(UrlRecord::total_clicks).sum();

    println!();
    println!(
        "  Links: {}  Clicks: {}",
        records.len().to_string().bright_white().bold(),
        total_clicks.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

fn print_record(record: &UrlRecord) {
    let status = if record.is_expired_at(Utc::now()) {
        "EXPIRED".red()
    } else {
        "ACTIVE".green()
    };

    println!("  Code:    {}", record.short_code.cyan());
    println!("  URL:     {}", record.original_url);
    println!(
        "  Created: {}",
        record.created_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
    );
    println!(
        "  Expires: {} {}",
        record.expiry_date.format("%Y-%m-%d %H:%M:%S").to_string().bright_black(),
        status
    );
    println!(
        "  Clicks:  {}",
        record.total_clicks().to_string().bright_green().bold()
    );

    if !record.clicks.is_empty() {
        println!();
        for click in &record.clicks {
            let referrer = if click.referrer.is_empty() {
                "-"
            } else {
                click.referrer.as_str()
            };
            println!(
                "  {}  {:<20} {}",
                click.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().bright_black(),
                click.geo,
                referrer
            );
        }
    }
    println!();
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
                .fetch_one(pool)
                .await?;

            let clicks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_clicks")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Links:      {}",
                links_count.to_string().bright_green().bold()
            );
            println!(
                "  Clicks:     {}",
                clicks_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
