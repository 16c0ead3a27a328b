//! CLI administration tool for book-catalog.
//!
//! Inspects and maintains the catalog database without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show server version and applied migrations
//! cargo run --bin admin -- db info
//!
//! # Author/book counts and the most prolific authors
//! cargo run --bin admin -- stats
//!
//! # List authors
//! cargo run --bin admin -- author list
//!
//! # Delete an author and all of their books
//! cargo run --bin admin -- author delete 42 --yes
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use book_catalog::config::database_url_from_env;
use book_catalog::domain::repositories::AuthorRepository;
use book_catalog::infrastructure::persistence::PgAuthorRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing book-catalog.
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
    /// Show catalog statistics
    Stats {
        /// Number of authors in the ranking
        #[arg(short, long, default_value_t = 5)]
        top: i64,
    },

    /// Manage authors
    Author {
        #[command(subcommand)]
        action: AuthorAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Author management subcommands.
#[derive(Subcommand)]
enum AuthorAction {
    /// List all authors with their book counts
    List,

    /// Delete an author together with their books
    Delete {
        /// Author ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
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
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = database_url_from_env()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Stats { top } => handle_stats(&pool, top).await?,
        Commands::Author { action } => handle_author_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches author management commands.
async fn handle_author_action(action: AuthorAction, pool: &PgPool) -> Result<()> {
    let repo = PgAuthorRepository::new(Arc::new(pool.clone()));

    match action {
        AuthorAction::List => list_authors(&repo).await,
        AuthorAction::Delete { id, yes } => delete_author(&repo, id, yes).await,
    }
}

/// Prints every author, newest first.
///
/// ```text
/// 📚 Authors
///
///   ID   Name                           Email                          Books
///   ─────────────────────────────────────────────────────────────────────────
///   2    Julio Cortázar                 jc@example.com                 4
/// ```
async fn list_authors(repo: &PgAuthorRepository) -> Result<()> {
    println!("{}", "📚 Authors".bright_blue().bold());
    println!();

    let authors = repo
        .list_with_book_counts()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list authors: {}", e))?;

    if authors.is_empty() {
        println!("{}", "  No authors found".yellow());
        return Ok(());
    }

    println!(
        "  {:<4} {:<30} {:<30} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Books".bright_white().bold()
    );
    println!("  {}", "─".repeat(73).bright_black());

    for listing in &authors {
        println!(
            "  {:<4} {:<30} {:<30} {}",
            listing.author.id.to_string().bright_black(),
            listing.author.name.cyan(),
            listing.author.email,
            listing.book_count.to_string().bright_green()
        );
    }

    println!();
    println!(
        "  Total: {}",
        authors.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes an author after confirmation (default: No).
async fn delete_author(repo: &PgAuthorRepository, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Author".bright_blue().bold());
    println!();

    let author = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Author not found")?;

    println!("  Author: {}", author.name.cyan());
    println!("  Email:  {}", author.email);
    println!();
    println!(
        "{}",
        "⚠️  All books of this author will be deleted too."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this author?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete author: {}", e))?;

    if deleted {
        println!("{}", "✅ Author deleted".green().bold());
    } else {
        println!("{}", "⚠️  Author was already gone".yellow());
    }
    println!();

    Ok(())
}

/// Displays catalog statistics.
///
/// Shows:
/// - Total number of authors
/// - Total number of books
/// - Authors ranked by number of books
async fn handle_stats(pool: &PgPool, top: i64) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let authors_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
        .fetch_one(pool)
        .await?;

    let books_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await?;

    println!(
        "  Authors: {}",
        authors_count.to_string().bright_green().bold()
    );
    println!(
        "  Books:   {}",
        books_count.to_string().bright_green().bold()
    );
    println!();

    let ranking: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT a.name, COUNT(b.id) AS books
        FROM authors a
        JOIN books b ON b.author_id = a.id
        GROUP BY a.id, a.name
        ORDER BY books DESC, a.name ASC
        LIMIT $1
        "#,
    )
    .bind(top.max(1))
    .fetch_all(pool)
    .await?;

    if !ranking.is_empty() {
        println!("{}", "  Top authors:".bright_white().bold());
        for (position, (name, books)) in ranking.iter().enumerate() {
            println!(
                "  {:>2}. {:<30} {}",
                position + 1,
                name.cyan(),
                books.to_string().bright_green()
            );
        }
        println!();
    }

    Ok(())
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

            println!("  PostgreSQL: {}", version.bright_white());

            let migrations: Vec<(i64, String)> = sqlx::query_as(
                "SELECT version, description FROM _sqlx_migrations ORDER BY version",
            )
            .fetch_all(pool)
            .await
            .unwrap_or_default();

            if migrations.is_empty() {
                println!("  Migrations: {}", "none applied".yellow());
            } else {
                println!("  Migrations:");
                for (version, description) in &migrations {
                    println!("    {} {}", version.to_string().bright_black(), description);
                }
            }
            println!();
        }
    }

    Ok(())
}
