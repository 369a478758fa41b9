//! Configuration management for the ulas pipeline
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. Run parameters (language, country, sort order,
//! score filter, paging) are all exposed here with working defaults for an
//! Indonesian-language Play Store analysis.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::models::SortOrder;
use crate::source::FetchOptions;
use crate::text::keywords::DEFAULT_KEYWORDS;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Review fetching configuration
    pub fetch: FetchConfig,

    /// Translation configuration
    pub translate: TranslateConfig,

    /// Keyword filter configuration
    pub keywords: KeywordConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Review fetching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Review language
    pub lang: String,

    /// Store country code
    pub country: String,

    /// Sort order (newest, rating, relevance)
    pub sort: String,

    /// Restrict to a single star rating (1-5); absent means unfiltered
    pub score_filter: Option<u8>,

    /// Reviews requested per batch (store caps at 200)
    pub batch_size: usize,

    /// Maximum number of batches per run
    pub max_batches: usize,

    /// Delay between consecutive batches in seconds
    pub batch_delay_secs: u64,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Translation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Target language for translated reviews
    pub target_lang: String,

    /// Upper bound on concurrently in-flight translation calls; 1 keeps the
    /// strictly sequential behavior
    pub max_in_flight: usize,
}

/// Keyword filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// Keyword phrases, tested in order; lowercased before matching
    pub words: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(lang) = std::env::var("ULAS_LANG") {
            config.fetch.lang = lang;
        }
        if let Ok(country) = std::env::var("ULAS_COUNTRY") {
            config.fetch.country = country;
        }
        if let Ok(sort) = std::env::var("ULAS_SORT") {
            config.fetch.sort = sort;
        }
        if let Ok(score) = std::env::var("ULAS_SCORE_FILTER") {
            config.fetch.score_filter = score.parse::<u8>().ok();
        }
        if let Some(batch_size) = env_parse("ULAS_BATCH_SIZE") {
            config.fetch.batch_size = batch_size;
        }
        if let Some(max_batches) = env_parse("ULAS_MAX_BATCHES") {
            config.fetch.max_batches = max_batches;
        }
        if let Some(delay) = env_parse("ULAS_BATCH_DELAY") {
            config.fetch.batch_delay_secs = delay;
        }
        if let Some(timeout) = env_parse("ULAS_REQUEST_TIMEOUT") {
            config.fetch.request_timeout_secs = timeout;
        }
        if let Ok(target) = std::env::var("ULAS_TARGET_LANG") {
            config.translate.target_lang = target;
        }
        if let Some(max_in_flight) = env_parse("ULAS_MAX_IN_FLIGHT") {
            config.translate.max_in_flight = max_in_flight;
        }
        if let Ok(level) = std::env::var("ULAS_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("ULAS_LOG_FORMAT") {
            config.logging.format = format;
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.fetch.batch_size == 0 || self.fetch.batch_size > 200 {
            anyhow::bail!("batch_size must be between 1 and 200");
        }

        if self.fetch.max_batches == 0 {
            anyhow::bail!("max_batches must be greater than 0");
        }

        if SortOrder::parse(&self.fetch.sort).is_none() {
            anyhow::bail!("unknown sort order: {}", self.fetch.sort);
        }

        if let Some(stars) = self.fetch.score_filter {
            if !(1..=5).contains(&stars) {
                anyhow::bail!("score_filter must be between 1 and 5");
            }
        }

        if self.translate.max_in_flight == 0 {
            anyhow::bail!("max_in_flight must be greater than 0");
        }

        if self.keywords.words.iter().any(|w| w.trim().is_empty()) {
            anyhow::bail!("keyword phrases must not be empty");
        }

        Ok(())
    }

    /// Get the parsed sort order
    ///
    /// Call [`Config::validate`] first; an unparseable value falls back to
    /// newest-first.
    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        SortOrder::parse(&self.fetch.sort).unwrap_or(SortOrder::Newest)
    }

    /// Get per-page fetch options derived from this configuration
    #[must_use]
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            lang: self.fetch.lang.clone(),
            country: self.fetch.country.clone(),
            sort: self.sort_order(),
            score_filter: self.fetch.score_filter,
            batch_size: self.fetch.batch_size,
        }
    }

    /// Get inter-batch delay as Duration
    #[must_use]
    pub fn batch_delay(&self) -> Duration {
        Duration::from_secs(self.fetch.batch_delay_secs)
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.request_timeout_secs)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig {
                lang: String::from("id"),
                country: String::from("id"),
                sort: String::from("newest"),
                score_filter: None,
                batch_size: 200,
                max_batches: 5,
                batch_delay_secs: 1,
                request_timeout_secs: 30,
            },
            translate: TranslateConfig {
                target_lang: String::from("en"),
                max_in_flight: 1,
            },
            keywords: KeywordConfig {
                words: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}
