use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use cinder::config::Config;
use cinder::models::ModerationRequest;
use cinder::output::terminal::{self, BatchTally};
use cinder::review::NoopClassifier;
use cinder::Moderator;

/// Cinder: rule-based content moderation for user-generated text.
///
/// Scores reviews, chat messages and listing descriptions and decides
/// whether to approve them, flag them for review, or block them.
#[derive(Parser)]
#[command(name = "cinder", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Moderate a single piece of text
    Check {
        /// The text to moderate
        text: String,

        /// Submitter reputation, 0-100 (default: 50)
        #[arg(long, default_value = "50")]
        reputation: i32,

        /// Print the response as JSON instead of a formatted report
        #[arg(long)]
        json: bool,
    },

    /// Moderate every non-empty line of a file
    Batch {
        /// File with one text per line
        file: PathBuf,

        /// Submitter reputation applied to every line (default: 50)
        #[arg(long, default_value = "50")]
        reputation: i32,

        /// Print one JSON response per line instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the normalized form of a text (what the term rules see)
    Normalize {
        /// The text to normalize
        text: String,
    },

    /// Show what the term catalog contains and whether fallback mode is active
    Catalog {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cinder=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            text,
            reputation,
            json,
        } => {
            let config = Config::load()?;
            let moderator = Moderator::from_config(&config);

            let request = ModerationRequest::new(text.clone()).with_reputation(reputation);
            let response = moderator
                .moderate_with_review(&request, &NoopClassifier)
                .await;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                terminal::display_response(&text, &response);
            }
        }

        Commands::Batch {
            file,
            reputation,
            json,
        } => {
            let config = Config::load()?;
            let moderator = Moderator::from_config(&config);

            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            info!(file = %file.display(), "Moderating batch");

            if !json {
                terminal::display_batch_header();
            }

            let mut tally = BatchTally::default();
            for (i, line) in contents.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let request = ModerationRequest::new(line).with_reputation(reputation);
                let response = moderator
                    .moderate_with_review(&request, &NoopClassifier)
                    .await;
                tally.add(response.decision);

                if json {
                    println!("{}", serde_json::to_string(&response)?);
                } else {
                    terminal::display_batch_line(i + 1, line, &response);
                }
            }

            if !json {
                terminal::display_batch_summary(&tally);
            }
        }

        Commands::Normalize { text } => {
            println!("{}", cinder::text::normalize(&text));
        }

        Commands::Catalog { json } => {
            let config = Config::load()?;
            if let Err(e) = config.require_catalog() {
                println!("{} {e}", "Warning:".yellow());
            }
            let moderator = Moderator::from_config(&config);
            let summary = moderator.catalog().summary();

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                terminal::display_catalog_summary(
                    &config.catalog_path.display().to_string(),
                    &summary,
                );
            }
        }
    }

    Ok(())
}
