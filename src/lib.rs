//! ulas - Google Play review sentiment analyzer
//!
//! Fetches user reviews for an app from the Play Store in batches, filters
//! them by keyword relevance, translates them to a target language, scores
//! their sentiment and maps the score onto a 5-point Likert satisfaction
//! scale.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`source`] - Review retrieval with batched pagination
//! - [`text`] - Text normalization and keyword filtering
//! - [`translate`] - Machine translation boundary
//! - [`sentiment`] - Polarity scoring and Likert scale mapping
//! - [`pipeline`] - Sequential analysis pipeline
//! - [`report`] - Tabular and summary rendering
//! - [`models`] - Core data structures and types
//!
//! # Example
//!
//! ```no_run
//! use ulas::config::Config;
//! use ulas::pipeline::{FilterMode, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let pipeline = Pipeline::new(config)?;
//!     let report = pipeline.run("com.example.app", FilterMode::Apply).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod sentiment;
pub mod source;
pub mod text;
pub mod translate;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{ResultRow, Review, ReviewPage, RunReport, SortOrder};
    pub use crate::pipeline::{FilterMode, Pipeline};
    pub use crate::sentiment::{LikertScale, SentimentScorer};
    pub use crate::source::{FetchOptions, ReviewSource};
    pub use crate::translate::Translator;
}

// Direct re-exports for convenience
pub use error::{Error, Result};
pub use models::{ResultRow, Review, ReviewPage, RunReport, SortOrder};
