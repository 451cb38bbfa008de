//! Command-line front end for short code generation.
//!
//! # Usage
//!
//! ```bash
//! # Create a short code for a URL
//! shortcode shorten https://www.example.com/some/long/path
//!
//! # Override the collision retry budget
//! shortcode shorten https://www.example.com/x --max-retries 5
//!
//! # Check whether a code is taken
//! shortcode exists OEWpcwvi
//!
//! # Show the record behind a code
//! shortcode get OEWpcwvi
//! ```
//!
//! Store selection and connection settings come from the environment; see
//! [`url_shortcode::config`]. Ctrl-C cancels an in-flight command.

use url_shortcode::application::services::UniquenessResolver;
use url_shortcode::config;
use url_shortcode::domain::entities::ShortCodeRecord;
use url_shortcode::error::ResolveError;
use url_shortcode::infrastructure::persistence::connect_store;
use url_shortcode::telemetry;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tokio_util::sync::CancellationToken;

/// Short code generator for URL shorteners.
#[derive(Parser)]
#[command(name = "shortcode")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a unique short code for a URL
    Shorten {
        /// The original URL
        url: String,

        /// Collision retries before giving up (defaults to MAX_RETRIES)
        #[arg(short, long)]
        max_retries: Option<u32>,
    },

    /// Check whether a short code is already taken
    Exists {
        /// Short code to check
        code: String,
    },

    /// Show the record stored under a short code
    Get {
        /// Short code to look up
        code: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    telemetry::init(&config.log_level, &config.log_format)?;
    config.print_summary();

    let store = connect_store(&config).await?;
    let resolver = UniquenessResolver::new(store).with_store_timeout(config.store_timeout());

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            trigger.cancel();
        }
    });

    match cli.command {
        Commands::Shorten { url, max_retries } => {
            let max_retries = max_retries.unwrap_or(config.max_retries);
            config::check_max_retries(max_retries).context("Invalid --max-retries")?;
            match resolver.create_unique(&url, max_retries, &cancel).await {
                Ok(record) => print_record(&record),
                Err(ResolveError::CollisionExhausted {
                    original_url,
                    attempts,
                }) => {
                    anyhow::bail!(
                        "no free short code for {} after {} attempts; retry later or raise --max-retries",
                        original_url,
                        attempts
                    );
                }
                Err(e) => return Err(e).context("Failed to create short code"),
            }
        }
        Commands::Exists { code } => {
            if resolver.is_taken(&code, &cancel).await? {
                println!("{} {}", code.bold(), "taken".red());
            } else {
                println!("{} {}", code.bold(), "free".green());
            }
        }
        Commands::Get { code } => match resolver.lookup(&code, &cancel).await? {
            Some(record) => print_record(&record),
            None => anyhow::bail!("short code {} not found", code),
        },
    }

    Ok(())
}

fn print_record(record: &ShortCodeRecord) {
    println!("{}", "✓ Short code".green().bold());
    println!("  Code:     {}", record.short_code.bold());
    println!("  URL:      {}", record.original_url);
    println!("  Created:  {}", record.created_at.to_rfc3339());
    println!("  Updated:  {}", record.updated_at.to_rfc3339());
}
