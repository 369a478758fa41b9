use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ulas::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "ulas",
    version,
    about = "Google Play review analyzer with keyword filtering and Likert-scale sentiment",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML); environment variables used otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, filter, translate and score reviews for an app
    Analyze {
        /// Google Play application id (e.g. com.example.app)
        app_id: String,

        /// Skip the keyword filter (the run produces no analysis output)
        #[arg(long, default_value = "false")]
        no_filter: bool,

        /// Review language
        #[arg(long)]
        lang: Option<String>,

        /// Store country code
        #[arg(long)]
        country: Option<String>,

        /// Sort order (newest, rating, relevance)
        #[arg(long)]
        sort: Option<String>,

        /// Restrict to a single star rating (1-5)
        #[arg(long)]
        stars: Option<u8>,

        /// Target language for translation
        #[arg(long)]
        target_lang: Option<String>,

        /// Maximum number of review batches
        #[arg(long)]
        max_batches: Option<usize>,

        /// Emit the report as JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Fetch raw reviews without analyzing them
    Fetch {
        /// Google Play application id
        app_id: String,

        /// Review language
        #[arg(long)]
        lang: Option<String>,

        /// Store country code
        #[arg(long)]
        country: Option<String>,

        /// Maximum number of review batches
        #[arg(long)]
        max_batches: Option<usize>,

        /// Number of reviews to preview
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    let log_format = cli
        .log_format
        .as_deref()
        .unwrap_or(&config.logging.format)
        .to_string();
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    match cli.command {
        Commands::Analyze {
            app_id,
            no_filter,
            lang,
            country,
            sort,
            stars,
            target_lang,
            max_batches,
            json,
        } => {
            let mut config = config;
            apply_fetch_overrides(&mut config, lang, country, max_batches);
            if let Some(sort) = sort {
                config.fetch.sort = sort;
            }
            if let Some(stars) = stars {
                config.fetch.score_filter = Some(stars);
            }
            if let Some(target) = target_lang {
                config.translate.target_lang = target;
            }

            tracing::info!(app_id = %app_id, filter = !no_filter, "Starting analyze command");
            commands::analyze(config, app_id, !no_filter, json).await?;
        }

        Commands::Fetch {
            app_id,
            lang,
            country,
            max_batches,
            limit,
        } => {
            let mut config = config;
            apply_fetch_overrides(&mut config, lang, country, max_batches);
            config.validate()?;

            tracing::info!(app_id = %app_id, limit = %limit, "Starting fetch command");
            commands::fetch(config, app_id, limit).await?;
        }
    }

    Ok(())
}

fn apply_fetch_overrides(
    config: &mut Config,
    lang: Option<String>,
    country: Option<String>,
    max_batches: Option<usize>,
) {
    if let Some(lang) = lang {
        config.fetch.lang = lang;
    }
    if let Some(country) = country {
        config.fetch.country = country;
    }
    if let Some(max_batches) = max_batches {
        config.fetch.max_batches = max_batches;
    }
}

/// Filter directives for the subscriber; `--verbose` wins over the
/// configured level
fn log_directives(level: &str, verbose: bool) -> String {
    if verbose {
        String::from("ulas=debug,info")
    } else {
        format!("ulas={level},warn")
    }
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::new(log_directives(level, verbose));

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
