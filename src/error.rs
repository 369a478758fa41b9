//! Unified error handling for the ulas crate
//!
//! Domain-specific errors live next to the code that raises them
//! ([`SourceError`], [`TranslateError`], [`SentimentError`]); this module
//! wraps them into a single [`Error`] enum so the pipeline boundary can
//! report which external collaborator a run-level failure came from.

use std::io;
use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::sentiment::SentimentError;
pub use crate::source::SourceError;
pub use crate::translate::TranslateError;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, rate limit)
    Network,
    /// Parsing and data extraction errors
    Parsing,
    /// Sentiment scoring errors
    Analysis,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

/// Unified error type for the ulas crate
///
/// Each external collaborator of the pipeline has a dedicated variant, so a
/// failed run can name the stage that failed instead of surfacing an
/// unstructured crash.
#[derive(Error, Debug)]
pub enum Error {
    /// Review source errors (fetch, pagination, payload extraction)
    #[error("Review source error: {0}")]
    Source(#[from] SourceError),

    /// Translation backend errors
    #[error("Translation error: {0}")]
    Translate(#[from] TranslateError),

    /// Sentiment scoring errors
    #[error("Sentiment error: {0}")]
    Sentiment(#[from] SentimentError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Check if this error is recoverable (a retry could succeed)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Source(e) => e.is_recoverable(),
            Self::Translate(e) => e.is_recoverable(),
            Self::Sentiment(_) => false,
            Self::Io(_) => true, // I/O errors are often transient
            Self::Json(_) => false,
            Self::Http(_) => true, // HTTP errors are often transient
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Source(e) => e.category(),
            Self::Translate(_) | Self::Http(_) => ErrorCategory::Network,
            Self::Sentiment(_) => ErrorCategory::Analysis,
            Self::Io(_) => ErrorCategory::Other,
            Self::Json(_) => ErrorCategory::Parsing,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }
}

// Conversion from anyhow::Error
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: err.to_string(),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
