//! Google Play review source over the `batchexecute` RPC endpoint
//!
//! Reviews are served by a private RPC surface: a form-encoded POST whose
//! `f.req` field carries a nested-JSON request, answered with an
//! anti-hijacking `)]}'` prefix followed by length-delimited JSON chunks.
//! This module speaks just enough of that protocol to page through reviews:
//! - User-Agent rotation
//! - envelope stripping and nested payload extraction
//! - continuation-token threading
//! - overridable base URL for testing with mock servers

use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::{header::USER_AGENT, Client};
use serde_json::{json, Deserializer, Value};
use std::time::Duration;
use url::Url;

use crate::models::{Review, ReviewPage};
use crate::source::{FetchOptions, ReviewSource, SourceError};

const DEFAULT_BASE_URL: &str = "https://play.google.com";

const BATCHEXECUTE_PATH: &str = "/_/PlayStoreUi/data/batchexecute";

/// RPC id of the review listing method
const RPC_ID: &str = "UsvDTd";

/// Pool of realistic User-Agent strings for rotation
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

/// Play Store review source
pub struct PlayStoreSource {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Base URL, overridable for testing with mock servers
    base_url: String,
}

impl PlayStoreSource {
    /// Create a new source with the given request timeout
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Http` if the HTTP client cannot be created
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a new source with a custom base URL for testing
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Http` if the HTTP client cannot be created
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let mut source = Self::new(timeout)?;
        source.base_url = base_url.to_string();
        Ok(source)
    }

    /// Build the batchexecute URL with language and country parameters
    fn endpoint(&self, opts: &FetchOptions) -> Result<Url, SourceError> {
        let base =
            Url::parse(&self.base_url).map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
        let mut url = base
            .join(BATCHEXECUTE_PATH)
            .map_err(|e| SourceError::InvalidUrl(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("rpcids", RPC_ID)
            .append_pair("hl", &opts.lang)
            .append_pair("gl", &opts.country);

        Ok(url)
    }

    /// Serialize the `f.req` payload for one review page
    ///
    /// The paging triple carries the batch size and the continuation token
    /// from the previous page; the optional star filter rides in a separate
    /// slot.
    fn rpc_request(app_id: &str, opts: &FetchOptions, token: Option<&str>) -> String {
        let paging = json!([opts.batch_size, null, token]);
        let star_filter = match opts.score_filter {
            Some(stars) => json!([null, stars]),
            None => Value::Null,
        };
        let request = json!([
            null,
            null,
            [2, opts.sort.rpc_code(), paging, null, star_filter],
            [app_id, 7]
        ]);

        json!([[[RPC_ID, request.to_string(), null, "generic"]]]).to_string()
    }

    /// Decode a batchexecute response body into one review page
    ///
    /// The body must start with the `)]}'` prefix; only the first JSON chunk
    /// is consumed (trailing chunks carry bookkeeping we ignore).
    fn parse_page(body: &str) -> Result<ReviewPage, SourceError> {
        let stripped = body
            .trim_start()
            .strip_prefix(")]}'")
            .ok_or(SourceError::Envelope)?;
        let start = stripped.find('[').ok_or(SourceError::Envelope)?;

        let mut chunks = Deserializer::from_str(&stripped[start..]).into_iter::<Value>();
        let outer = chunks
            .next()
            .ok_or(SourceError::Envelope)?
            .map_err(|e| SourceError::Payload(e.to_string()))?;

        let frames = outer
            .as_array()
            .ok_or_else(|| SourceError::Payload("outer frame is not an array".into()))?;
        let payload = frames
            .iter()
            .find(|frame| {
                frame.get(0).and_then(Value::as_str) == Some("wrb.fr")
                    && frame.get(1).and_then(Value::as_str) == Some(RPC_ID)
            })
            .and_then(|frame| frame.get(2))
            .ok_or_else(|| SourceError::Payload("review frame missing".into()))?;

        // A null payload means the app has no reviews at all
        let Some(payload_str) = payload.as_str() else {
            return Ok(ReviewPage::default());
        };

        let data: Value =
            serde_json::from_str(payload_str).map_err(|e| SourceError::Payload(e.to_string()))?;

        let reviews = data
            .get(0)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get(4).and_then(Value::as_str))
                    .map(Review::new)
                    .collect()
            })
            .unwrap_or_default();

        let next_token = data
            .get(1)
            .and_then(|v| v.get(1))
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(ReviewPage {
            reviews,
            next_token,
        })
    }

    /// Get a random user agent from the pool
    fn random_user_agent() -> &'static str {
        let mut rng = rand::thread_rng();
        USER_AGENTS.choose(&mut rng).unwrap_or(&USER_AGENTS[0])
    }
}

#[async_trait]
impl ReviewSource for PlayStoreSource {
    async fn fetch_page(
        &self,
        app_id: &str,
        opts: &FetchOptions,
        token: Option<&str>,
    ) -> Result<ReviewPage, SourceError> {
        let url = self.endpoint(opts)?;
        let payload = Self::rpc_request(app_id, opts, token);

        let response = self
            .client
            .post(url)
            .header(USER_AGENT, Self::random_user_agent())
            .form(&[("f.req", payload)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::ServerStatus(status.as_u16()));
        }

        let body = response.text().await?;
        Self::parse_page(&body)
    }
}
