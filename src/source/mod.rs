//! Review source abstraction and batched retrieval
//!
//! [`ReviewSource`] is the interface boundary to the external review store;
//! [`fetch_batched`] drives it in bounded pages, threading the opaque
//! continuation token and imposing a fixed inter-batch delay. Stopping is an
//! early exit on source exhaustion, never a retry mechanism.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::ErrorCategory;
use crate::models::{ReviewPage, SortOrder};

pub mod play;

pub use play::PlayStoreSource;

/// Errors that can occur while talking to the review source
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server responded with a non-success status
    #[error("server error: {0}")]
    ServerStatus(u16),

    /// Response envelope did not carry the expected anti-hijacking prefix
    #[error("malformed response envelope")]
    Envelope,

    /// Response payload did not have the expected shape
    #[error("unexpected payload shape: {0}")]
    Payload(String),

    /// Invalid URL construction
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl SourceError {
    /// Check if this error is recoverable (a retry could succeed)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::ServerStatus(status) => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Envelope | Self::Payload(_) | Self::InvalidUrl(_) => false,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) | Self::ServerStatus(_) => ErrorCategory::Network,
            Self::Envelope | Self::Payload(_) => ErrorCategory::Parsing,
            Self::InvalidUrl(_) => ErrorCategory::Config,
        }
    }
}

/// Request parameters for one review fetch
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Review language (BCP-47 primary subtag)
    pub lang: String,

    /// Store country code
    pub country: String,

    /// Sort order of the returned reviews
    pub sort: SortOrder,

    /// Restrict to a single star rating (1-5); `None` means unfiltered
    pub score_filter: Option<u8>,

    /// Maximum reviews per page (the store caps this at 200)
    pub batch_size: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            lang: String::from("id"),
            country: String::from("id"),
            sort: SortOrder::Newest,
            score_filter: None,
            batch_size: 200,
        }
    }
}

/// Paginated review retrieval boundary
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetch one page of reviews for an app
    ///
    /// `token` is the continuation token returned by the previous page;
    /// `None` requests the first page. An absent `next_token` in the result
    /// signals source exhaustion.
    async fn fetch_page(
        &self,
        app_id: &str,
        opts: &FetchOptions,
        token: Option<&str>,
    ) -> Result<ReviewPage, SourceError>;
}

/// Fetch up to `max_batches` pages and accumulate the review contents into
/// one flat, source-ordered sequence
///
/// Stops after `max_batches` pages or as soon as a page carries no
/// continuation token, whichever comes first. The `batch_delay` is applied
/// after every batch that is followed by another batch, not after the last.
/// No deduplication; a source failure propagates to the caller.
pub async fn fetch_batched<S>(
    source: &S,
    app_id: &str,
    opts: &FetchOptions,
    max_batches: usize,
    batch_delay: Duration,
) -> Result<Vec<String>, SourceError>
where
    S: ReviewSource + ?Sized,
{
    let mut contents = Vec::new();
    let mut token: Option<String> = None;

    for batch in 0..max_batches {
        let page = source.fetch_page(app_id, opts, token.as_deref()).await?;
        tracing::debug!(
            batch = batch + 1,
            reviews = page.reviews.len(),
            has_token = page.next_token.is_some(),
            "fetched review batch"
        );

        contents.extend(page.reviews.into_iter().map(|r| r.content));

        match page.next_token {
            Some(next) if batch + 1 < max_batches => {
                token = Some(next);
                tokio::time::sleep(batch_delay).await;
            }
            _ => break,
        }
    }

    tracing::info!(total = contents.len(), app_id, "review fetch complete");
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Review;
    use std::sync::Mutex;

    /// Scripted source: pops pre-baked pages and records the tokens it was
    /// handed
    struct ScriptedSource {
        pages: Mutex<Vec<ReviewPage>>,
        seen_tokens: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<ReviewPage>) -> Self {
            let mut pages = pages;
            pages.reverse();
            Self {
                pages: Mutex::new(pages),
                seen_tokens: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ReviewSource for ScriptedSource {
        async fn fetch_page(
            &self,
            _app_id: &str,
            _opts: &FetchOptions,
            token: Option<&str>,
        ) -> Result<ReviewPage, SourceError> {
            self.seen_tokens
                .lock()
                .unwrap()
                .push(token.map(str::to_string));
            Ok(self.pages.lock().unwrap().pop().unwrap_or_default())
        }
    }

    fn page(count: usize, prefix: &str, next_token: Option<&str>) -> ReviewPage {
        ReviewPage {
            reviews: (0..count)
                .map(|i| Review::new(format!("{prefix}-{i}")))
                .collect(),
            next_token: next_token.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_stops_after_max_batches() {
        // Source always hands out another token; loop must cap at 5 calls
        let pages = (0..8)
            .map(|i| page(3, &format!("b{i}"), Some("more")))
            .collect();
        let source = ScriptedSource::new(pages);

        let reviews = fetch_batched(
            &source,
            "com.example.app",
            &FetchOptions::default(),
            5,
            Duration::from_millis(0),
        )
        .await
        .unwrap();

        assert_eq!(reviews.len(), 15);
        assert_eq!(source.seen_tokens.lock().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_early_exit_on_absent_token() {
        let pages = vec![
            page(2, "b0", Some("t1")),
            page(2, "b1", None),
            page(2, "b2", Some("t3")),
        ];
        let source = ScriptedSource::new(pages);

        let reviews = fetch_batched(
            &source,
            "com.example.app",
            &FetchOptions::default(),
            5,
            Duration::from_millis(0),
        )
        .await
        .unwrap();

        // Third page never requested
        assert_eq!(reviews.len(), 4);
        assert_eq!(source.seen_tokens.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_token_is_threaded() {
        let pages = vec![page(1, "b0", Some("t1")), page(1, "b1", None)];
        let source = ScriptedSource::new(pages);

        fetch_batched(
            &source,
            "com.example.app",
            &FetchOptions::default(),
            5,
            Duration::from_millis(0),
        )
        .await
        .unwrap();

        let tokens = source.seen_tokens.lock().unwrap();
        assert_eq!(*tokens, vec![None, Some("t1".to_string())]);
    }

    #[tokio::test]
    async fn test_accumulates_in_source_order() {
        let pages = vec![page(2, "b0", Some("t1")), page(2, "b1", None)];
        let source = ScriptedSource::new(pages);

        let reviews = fetch_batched(
            &source,
            "com.example.app",
            &FetchOptions::default(),
            5,
            Duration::from_millis(0),
        )
        .await
        .unwrap();

        assert_eq!(reviews, vec!["b0-0", "b0-1", "b1-0", "b1-1"]);
    }

    #[test]
    fn test_source_error_recoverability() {
        assert!(SourceError::ServerStatus(503).is_recoverable());
        assert!(!SourceError::ServerStatus(404).is_recoverable());
        assert!(!SourceError::Envelope.is_recoverable());
    }
}
