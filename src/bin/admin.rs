//! CLI administration tool for shortlink.
//!
//! Reads and writes the same PostgreSQL database as the server, without
//! going through the HTTP API. Nothing here counts clicks.
//!
//! # Usage
//!
//! ```bash
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Newest links first
//! cargo run --bin admin -- list --limit 20
//!
//! # Shorten a URL (same rules as POST /api/shorten)
//! cargo run --bin admin -- shorten example.com/some/page
//!
//! # Inspect one link
//! cargo run --bin admin -- show aB3dE_9x
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` components), `BASE_URL`,
//! and the `SHORT_CODE_*` settings.

use shortlink::application::services::LinkService;
use shortlink::config::{Config, StorageBackend};
use shortlink::domain::entities::Link;
use shortlink::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
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
    /// Show link and click totals
    Stats,

    /// List links, newest first
    List {
        /// Maximum number of links to print
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },

    /// Shorten a URL
    Shorten {
        /// URL to shorten; `https://` is assumed when no scheme is given
        url: String,
    },

    /// Show a single link by short code
    Show {
        /// Short code
        code: String,
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

type PgLinkService = LinkService<PgLinkRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    if config.storage != StorageBackend::Postgres {
        anyhow::bail!("admin works on PostgreSQL storage only (STORAGE_BACKEND=postgres)");
    }
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    let service = LinkService::new(
        Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))),
        config.link_service_settings()?,
    );

    match cli.command {
        Commands::Stats => handle_stats(&service).await?,
        Commands::List { limit } => handle_list(&service, limit).await?,
        Commands::Shorten { url } => handle_shorten(&service, &url).await?,
        Commands::Show { code } => handle_show(&service, &code).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Displays link and click totals.
async fn handle_stats(service: &PgLinkService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let catalog = service
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load links: {}", e))?;

    println!(
        "  Links:  {}",
        catalog.total_urls.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        catalog.total_clicks.to_string().bright_green().bold()
    );

    if let Some(top) = catalog.links.iter().max_by_key(|link| link.clicks)
        && top.clicks > 0
    {
        println!(
            "  Top:    {} ({} clicks)",
            top.short_code.cyan(),
            top.clicks.to_string().bright_white()
        );
    }
    println!();

    Ok(())
}

/// Lists links as a table.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code       Clicks   Created            Original URL
///   ─────────────────────────────────────────────────────────────
///   aB3dE_9x   4        2025-01-15 10:30   https://example.com
/// ```
async fn handle_list(service: &PgLinkService, limit: usize) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let catalog = service
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if catalog.links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin shorten <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<10} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in catalog.links.iter().take(limit) {
        println!(
            "  {:<10} {:<8} {:<18} {}",
            link.short_code.cyan(),
            link.clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    println!();
    println!(
        "  Showing {} of {}",
        catalog.links.len().min(limit).to_string().bright_white().bold(),
        catalog.total_urls.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn handle_shorten(service: &PgLinkService, url: &str) -> Result<()> {
    let outcome = service
        .shorten(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    if outcome.created {
        println!("{}", "✅ Short link created".green().bold());
    } else {
        println!("{}", "ℹ️  URL was already shortened".yellow());
    }
    println!();
    print_link(&outcome.link);

    Ok(())
}

async fn handle_show(service: &PgLinkService, code: &str) -> Result<()> {
    let link = service
        .get_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", code, e))?;

    print_link(&link);

    Ok(())
}

fn print_link(link: &Link) {
    println!("  Code:      {}", link.short_code.cyan());
    println!("  Short URL: {}", link.short_url.bright_yellow().bold());
    println!("  Original:  {}", link.original_url);
    println!("  Clicks:    {}", link.clicks.to_string().bright_green());
    println!(
        "  Created:   {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string().bright_black()
    );
    println!(
        "  Updated:   {}",
        link.updated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string().bright_black()
    );
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
            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
