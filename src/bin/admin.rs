//! CLI administration tool for link-registry.
//!
//! Operates directly on the database through the same services library
//! users get, so uniqueness and status rules are identical.
//!
//! # Usage
//!
//! ```bash
//! # Apply migrations
//! cargo run --bin admin -- db migrate
//!
//! # Submit a link
//! cargo run --bin admin -- link submit https://example.com --title "Example"
//!
//! # Links with no post on any channel (or on one channel)
//! cargo run --bin admin -- link unposted
//! cargo run --bin admin -- link unposted --channel twitter
//!
//! # Record publication
//! cargo run --bin admin -- content add 1 twitter
//! cargo run --bin admin -- post record 1
//! ```
//!
//! # Environment Variables
//!
//! See [`link_registry::config`]. `DATABASE_URL` is the minimum.

use link_registry::AppState;
use link_registry::config;
use link_registry::domain::entities::Link;
use link_registry::error::{AppError, ValidationError};
use link_registry::infrastructure::database;
use link_registry::prelude::LinkSubmission;
use link_registry::telemetry::init_tracing;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-registry.
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
    /// Manage links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Prepare links for a channel
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },

    /// Record publications
    Post {
        #[command(subcommand)]
        action: PostAction,
    },

    /// Manage favorites on links
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Submit a new URL
    Submit {
        url: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        summary: Option<String>,

        /// Id of the submitting user
        #[arg(long)]
        user: Option<i64>,
    },

    /// Show one link
    Show {
        id: i64,

        /// Print the link record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List links ordered by id
    List {
        #[arg(long, default_value_t = 1)]
        page: i64,

        #[arg(long, default_value_t = 50)]
        page_size: i64,
    },

    /// List links with no post on any channel
    Unposted {
        /// Restrict to one channel (e.g. "twitter")
        #[arg(short, long)]
        channel: Option<String>,
    },

    /// Check whether a URL was already submitted
    Check { url: String },

    /// Delete a link with its contents, posts and favorites
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ContentAction {
    /// Prepare a link for a channel
    Add { link_id: i64, channel: String },
}

#[derive(Subcommand)]
enum PostAction {
    /// Record that a content item was published
    Record { content_id: i64 },
}

#[derive(Subcommand)]
enum FavoriteAction {
    /// Favorite a link for a user
    Add { link_id: i64, user_id: i64 },

    /// Remove a user's favorite
    Remove { link_id: i64, user_id: i64 },

    /// Check whether a user favorited a link
    Check { link_id: i64, user_id: i64 },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    init_tracing(&config);

    let pool = database::connect(&config).await?;

    let state = AppState::new(Arc::new(pool.clone()));

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &state).await?,
        Commands::Content { action } => handle_content_action(action, &state).await?,
        Commands::Post { action } => handle_post_action(action, &state).await?,
        Commands::Favorite { action } => handle_favorite_action(action, &state).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, state: &AppState) -> Result<()> {
    match action {
        LinkAction::Submit {
            url,
            title,
            summary,
            user,
        } => {
            let submission = LinkSubmission {
                url,
                title,
                summary,
                submitted_by: user,
            };
            submit_link(state, submission).await?;
        }
        LinkAction::Show { id, json } => {
            let link = state.link_service.get_link(id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&link)?);
            } else {
                print_link_details(state, &link).await?;
            }
        }
        LinkAction::List { page, page_size } => {
            let links = state.link_service.list_links(page, page_size).await?;
            print_link_table("🔗 Links", &links);
        }
        LinkAction::Unposted { channel } => {
            let publication = &state.publication_service;
            let (heading, links) = match channel {
                Some(tag) => {
                    let kind = publication.registry().parse(&tag)?;
                    (
                        format!("📭 Links not posted to {}", kind.label()),
                        publication.unposted_on(kind).await?,
                    )
                }
                None => (
                    "📭 Links not posted to any channel".to_string(),
                    publication.unposted().await?,
                ),
            };
            print_link_table(&heading, &links);
        }
        LinkAction::Check { url } => match state.link_service.find_conflicting(&url).await? {
            Some(existing) => println!(
                "{} already submitted as link {}",
                "⚠️ ".yellow(),
                existing.id.to_string().bright_white().bold()
            ),
            None => println!("{}", "✅ URL has not been submitted".green()),
        },
        LinkAction::Delete { id, yes } => delete_link(state, id, yes).await?,
    }

    Ok(())
}

/// Submits a link and reports "created" and "already existed" differently.
async fn submit_link(state: &AppState, submission: LinkSubmission) -> Result<()> {
    match state.link_service.submit(submission).await {
        Ok(link) => {
            println!("{}", "✅ Link created".green().bold());
            println!("  ID:   {}", link.id.to_string().bright_white().bold());
            println!("  Name: {}", link.display_name().cyan());
            Ok(())
        }
        Err(AppError::Validation(ValidationError::DuplicateUrl { existing_link })) => {
            println!("{}", "⚠️  This URL was already submitted".yellow().bold());
            println!(
                "  Existing link: {} ({})",
                existing_link.id.to_string().bright_white().bold(),
                existing_link.display_name().cyan()
            );
            Ok(())
        }
        Err(e) => Err(e).context("Failed to submit link"),
    }
}

/// Prints one link with its publication status per channel.
async fn print_link_details(state: &AppState, link: &Link) -> Result<()> {
    let publication = &state.publication_service;

    println!("{}", link.display_name().bright_blue().bold());
    println!();
    println!("  ID:       {}", link.id.to_string().bright_black());
    println!("  URL:      {}", link.url.cyan());
    if let Some(summary) = link.summary.as_deref() {
        println!("  Summary:  {}", summary);
    }
    println!(
        "  Created:  {}",
        link.created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!();

    for kind in publication.kinds() {
        let status = if publication.has_post(link.id, *kind).await? {
            "POSTED".green()
        } else {
            "PENDING".yellow()
        };
        println!("  {:<10} {}", kind.label(), status);
    }
    println!();

    Ok(())
}

/// Prints links as a table.
///
/// # Output Format
///
/// ```text
/// 🔗 Links
///
///   ID    Name                                     Created
///   ───────────────────────────────────────────────────────────────────
///   1     Rust                                     2024-01-15 10:30
/// ```
fn print_link_table(heading: &str, links: &[Link]) {
    println!("{}", heading.bright_blue().bold());
    println!();

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        return;
    }

    println!(
        "  {:<5} {:<40} {:<20}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(67).bright_black());

    for link in links {
        println!(
            "  {:<5} {:<40} {}",
            link.id.to_string().bright_black(),
            truncate(link.display_name(), 40).cyan(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();
}

/// Deletes a link after confirmation.
///
/// Confirmation defaults to No; `--yes` skips it.
async fn delete_link(state: &AppState, id: i64, skip_confirm: bool) -> Result<()> {
    let link = state.link_service.get_link(id).await?;

    println!("{}", "🗑️  Delete link".bright_blue().bold());
    println!();
    println!("  Link: {}", link.display_name().cyan());
    println!("  ID:   {}", link.id.to_string().bright_black());
    println!();
    println!(
        "{}",
        "Contents, posts and favorites of this link are deleted too.".yellow()
    );

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    state.link_service.delete_link(id).await?;

    println!();
    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

async fn handle_content_action(action: ContentAction, state: &AppState) -> Result<()> {
    match action {
        ContentAction::Add { link_id, channel } => {
            let publication = &state.publication_service;
            let kind = publication.registry().parse(&channel)?;
            let content = publication.create_content(link_id, kind).await?;

            println!(
                "{} content {} for {}",
                "✅ Created".green().bold(),
                content.id.to_string().bright_white().bold(),
                kind.label().cyan()
            );
        }
    }

    Ok(())
}

async fn handle_post_action(action: PostAction, state: &AppState) -> Result<()> {
    match action {
        PostAction::Record { content_id } => {
            let post = state.publication_service.record_post(content_id).await?;

            println!(
                "{} post {} for content {}",
                "✅ Recorded".green().bold(),
                post.id.to_string().bright_white().bold(),
                content_id.to_string().bright_black()
            );
        }
    }

    Ok(())
}

async fn handle_favorite_action(action: FavoriteAction, state: &AppState) -> Result<()> {
    let favorites = &state.favorite_service;

    match action {
        FavoriteAction::Add { link_id, user_id } => {
            let link = state.link_service.get_link(link_id).await?;
            favorites.favorite(&link, user_id).await?;
            println!("{}", "✅ Favorite recorded".green().bold());
        }
        FavoriteAction::Remove { link_id, user_id } => {
            let link = state.link_service.get_link(link_id).await?;
            if favorites.unfavorite(&link, user_id).await? {
                println!("{}", "✅ Favorite removed".green().bold());
            } else {
                println!("{}", "⚠️  No favorite to remove".yellow());
            }
        }
        FavoriteAction::Check { link_id, user_id } => {
            let link = state.link_service.get_link(link_id).await?;
            let favorited = favorites.is_favorited_by(&link, user_id).await?;
            let total = favorites.favorite_count(&link).await?;

            let answer = if favorited { "yes".green() } else { "no".red() };
            println!(
                "  Favorited by user {}: {} ({} total)",
                user_id.to_string().bright_white(),
                answer,
                total
            );
        }
    }

    Ok(())
}

/// Handles database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            database::migrate(pool).await?;
            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
