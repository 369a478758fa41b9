//! Machine translation boundary
//!
//! One call per review, synchronous from the pipeline's point of view. The
//! default backend is the unofficial `translate_a/single` endpoint with the
//! `gtx` client id, which answers with a nested JSON array of translated
//! segments.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Errors that can occur while translating
#[derive(thiserror::Error, Debug)]
pub enum TranslateError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server responded with a non-success status
    #[error("server error: {0}")]
    ServerStatus(u16),

    /// Response payload did not have the expected shape
    #[error("unexpected payload shape: {0}")]
    Payload(String),

    /// Invalid URL construction
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl TranslateError {
    /// Check if this error is recoverable (a retry could succeed)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::ServerStatus(status) => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Payload(_) | Self::InvalidUrl(_) => false,
        }
    }
}

/// Text translation boundary
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate one text into the target language (BCP-47 primary subtag)
    async fn translate(&self, text: &str, target_lang: &str)
        -> Result<String, TranslateError>;
}

const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

const TRANSLATE_PATH: &str = "/translate_a/single";

/// Translator backed by the unofficial `gtx` web endpoint
pub struct GoogleTranslator {
    client: Client,

    /// Base URL, overridable for testing with mock servers
    base_url: String,
}

impl GoogleTranslator {
    /// Create a new translator with the given request timeout
    ///
    /// # Errors
    ///
    /// Returns `TranslateError::Http` if the HTTP client cannot be created
    pub fn new(timeout: Duration) -> Result<Self, TranslateError> {
        let client = Client::builder().timeout(timeout).gzip(true).build()?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a new translator with a custom base URL for testing
    ///
    /// # Errors
    ///
    /// Returns `TranslateError::Http` if the HTTP client cannot be created
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, TranslateError> {
        let mut translator = Self::new(timeout)?;
        translator.base_url = base_url.to_string();
        Ok(translator)
    }

    fn endpoint(&self, text: &str, target_lang: &str) -> Result<Url, TranslateError> {
        let base =
            Url::parse(&self.base_url).map_err(|e| TranslateError::InvalidUrl(e.to_string()))?;
        let mut url = base
            .join(TRANSLATE_PATH)
            .map_err(|e| TranslateError::InvalidUrl(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", "auto")
            .append_pair("tl", target_lang)
            .append_pair("dt", "t")
            .append_pair("q", text);

        Ok(url)
    }

    /// Concatenate the translated segments of a `translate_a/single` payload
    ///
    /// The payload shape is `[[["translated", "original", ...], ...], ...]`.
    fn parse_translation(body: &str) -> Result<String, TranslateError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| TranslateError::Payload(e.to_string()))?;

        let segments = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| TranslateError::Payload("segment list missing".into()))?;

        let translated: String = segments
            .iter()
            .filter_map(|seg| seg.get(0).and_then(Value::as_str))
            .collect();

        Ok(translated)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        let url = self.endpoint(text, target_lang)?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::ServerStatus(status.as_u16()));
        }

        let body = response.text().await?;
        Self::parse_translation(&body)
    }
}
