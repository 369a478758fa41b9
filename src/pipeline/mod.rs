//! Sequential review analysis pipeline
//!
//! Composes the review source, the text normalizer, the keyword filter, the
//! translator and the sentiment scorer into one run:
//!
//! ```text
//! fetch -> normalize -> filter -> translate -> score -> Likert -> report
//! ```
//!
//! Collaborators are injected behind traits and constructed once per
//! pipeline, so tests can substitute fakes. Errors are wrapped at this
//! boundary into the unified [`Error`](crate::error::Error) so a failed run
//! names the collaborator that failed.

use futures::{stream, StreamExt, TryStreamExt};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{ResultRow, RunReport};
use crate::sentiment::{LexiconScorer, LikertScale, SentimentScorer};
use crate::source::{fetch_batched, PlayStoreSource, ReviewSource};
use crate::text::{normalize, KeywordSet};
use crate::translate::{GoogleTranslator, Translator};

/// Run-mode choice, decided before the pipeline runs
///
/// Declining the filter skips the entire run, the fetch included: a skipped
/// run issues no request to the review source and produces no output of any
/// kind. The short-circuit deliberately happens before the fetch, not
/// between fetching and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Apply the keyword filter and run the full pipeline
    Apply,
    /// Decline filtering; the run produces no output
    Skip,
}

/// Review analysis pipeline with injectable collaborators
pub struct Pipeline {
    source: Box<dyn ReviewSource>,
    translator: Box<dyn Translator>,
    scorer: Box<dyn SentimentScorer>,
    config: Config,
}

impl Pipeline {
    /// Create a pipeline with the default collaborators (Play Store source,
    /// gtx translator, lexicon scorer)
    pub fn new(config: Config) -> Result<Self> {
        config.validate().map_err(|e| Error::config(e.to_string()))?;

        let timeout = config.request_timeout();
        let source = PlayStoreSource::new(timeout)?;
        let translator = GoogleTranslator::new(timeout)?;

        Ok(Self {
            source: Box::new(source),
            translator: Box::new(translator),
            scorer: Box::new(LexiconScorer::new()),
            config,
        })
    }

    /// Create a pipeline with explicit collaborators
    pub fn with_collaborators(
        config: Config,
        source: Box<dyn ReviewSource>,
        translator: Box<dyn Translator>,
        scorer: Box<dyn SentimentScorer>,
    ) -> Result<Self> {
        config.validate().map_err(|e| Error::config(e.to_string()))?;

        Ok(Self {
            source,
            translator,
            scorer,
            config,
        })
    }

    /// Run the pipeline for one app
    ///
    /// Returns `Ok(None)` when the filter was declined; otherwise a
    /// [`RunReport`] with the result rows and summary statistics. An empty
    /// filtered set is not an error and yields an empty report with no mean.
    pub async fn run(&self, app_id: &str, mode: FilterMode) -> Result<Option<RunReport>> {
        if mode == FilterMode::Skip {
            tracing::info!(app_id, "keyword filter declined, skipping run");
            return Ok(None);
        }

        let opts = self.config.fetch_options();
        let raw = fetch_batched(
            self.source.as_ref(),
            app_id,
            &opts,
            self.config.fetch.max_batches,
            self.config.batch_delay(),
        )
        .await?;

        let normalized: Vec<String> = raw.iter().map(|r| normalize(r)).collect();

        let keywords = KeywordSet::new(self.config.keywords.words.iter().cloned())
            .map_err(|e| Error::config(format!("bad keyword pattern: {e}")))?;
        let filtered = keywords.filter(&normalized);
        tracing::info!(
            fetched = raw.len(),
            kept = filtered.len(),
            "keyword filter applied"
        );

        let translated = self.translate_all(&filtered).await?;

        let mut rows = Vec::with_capacity(filtered.len());
        for (i, (review, translated)) in filtered.iter().zip(translated.iter()).enumerate() {
            let score = self.scorer.score(translated)?;
            let likert = LikertScale::from_score(score);
            tracing::debug!(index = i + 1, score, likert = %likert, "review scored");
            rows.push(ResultRow {
                index: i + 1,
                review: review.clone(),
                translated: translated.clone(),
                score,
                likert,
            });
        }

        Ok(Some(RunReport::from_rows(rows)))
    }

    /// Translate every filtered review, preserving input order
    ///
    /// `max_in_flight` bounds the number of concurrently issued calls; the
    /// default of 1 translates strictly one at a time.
    async fn translate_all(&self, reviews: &[String]) -> Result<Vec<String>> {
        let target = self.config.translate.target_lang.as_str();
        let max_in_flight = self.config.translate.max_in_flight.max(1);

        let translated = stream::iter(reviews)
            .map(|review| self.translator.translate(review, target))
            .buffered(max_in_flight)
            .try_collect::<Vec<_>>()
            .await?;

        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Review, ReviewPage};
    use crate::sentiment::SentimentError;
    use crate::source::{FetchOptions, SourceError};
    use crate::translate::TranslateError;
    use async_trait::async_trait;

    struct StaticSource(Vec<&'static str>);

    #[async_trait]
    impl ReviewSource for StaticSource {
        async fn fetch_page(
            &self,
            _app_id: &str,
            _opts: &FetchOptions,
            _token: Option<&str>,
        ) -> std::result::Result<ReviewPage, SourceError> {
            Ok(ReviewPage {
                reviews: self.0.iter().map(|s| Review::new(*s)).collect(),
                next_token: None,
            })
        }
    }

    /// Echoes its input, tagged so tests can see the call happened
    struct EchoTranslator;

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate(
            &self,
            text: &str,
            _target_lang: &str,
        ) -> std::result::Result<String, TranslateError> {
            Ok(format!("en:{text}"))
        }
    }

    struct FixedScorer(f64);

    impl SentimentScorer for FixedScorer {
        fn score(&self, _text: &str) -> std::result::Result<f64, SentimentError> {
            Ok(self.0)
        }
    }

    fn pipeline(source: Vec<&'static str>, score: f64) -> Pipeline {
        Pipeline::with_collaborators(
            Config::default(),
            Box::new(StaticSource(source)),
            Box::new(EchoTranslator),
            Box::new(FixedScorer(score)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_skip_mode_produces_no_output() {
        let p = pipeline(vec!["sistem bagus"], 0.5);
        let result = p.run("com.example.app", FilterMode::Skip).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_end_to_end_normalize_and_filter() {
        let p = pipeline(
            vec![
                "Sistem ini sangat membantu pengguna!! \u{1F60A}123",
                "Aplikasi lambat banget",
            ],
            0.7,
        );
        let report = p
            .run("com.example.app", FilterMode::Apply)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(report.rows.len(), 1);
        let row = &report.rows[0];
        assert_eq!(row.index, 1);
        assert_eq!(row.review, "sistem ini sangat membantu pengguna");
        assert_eq!(row.translated, "en:sistem ini sangat membantu pengguna");
        assert_eq!(row.likert.value(), 5);
        assert_eq!(report.label_counts, vec![("Sangat Puas Sekali".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_empty_filtered_set_is_not_an_error() {
        let p = pipeline(vec!["aplikasi cepat", "jelek sekali"], 0.0);
        let report = p
            .run("com.example.app", FilterMode::Apply)
            .await
            .unwrap()
            .unwrap();

        assert!(report.is_empty());
        assert!(report.mean_score.is_none());
        assert!(report.label_counts.is_empty());
    }

    #[tokio::test]
    async fn test_source_failure_is_identified() {
        struct FailingSource;

        #[async_trait]
        impl ReviewSource for FailingSource {
            async fn fetch_page(
                &self,
                _app_id: &str,
                _opts: &FetchOptions,
                _token: Option<&str>,
            ) -> std::result::Result<ReviewPage, SourceError> {
                Err(SourceError::ServerStatus(404))
            }
        }

        let p = Pipeline::with_collaborators(
            Config::default(),
            Box::new(FailingSource),
            Box::new(EchoTranslator),
            Box::new(FixedScorer(0.0)),
        )
        .unwrap();

        let err = p
            .run("com.invalid.app", FilterMode::Apply)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Source(_)));
    }

    #[tokio::test]
    async fn test_translator_failure_is_identified() {
        struct FailingTranslator;

        #[async_trait]
        impl Translator for FailingTranslator {
            async fn translate(
                &self,
                _text: &str,
                _target_lang: &str,
            ) -> std::result::Result<String, TranslateError> {
                Err(TranslateError::ServerStatus(429))
            }
        }

        let p = Pipeline::with_collaborators(
            Config::default(),
            Box::new(StaticSource(vec!["sistem bagus"])),
            Box::new(FailingTranslator),
            Box::new(FixedScorer(0.0)),
        )
        .unwrap();

        let err = p
            .run("com.example.app", FilterMode::Apply)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Translate(_)));
    }

    #[tokio::test]
    async fn test_rows_preserve_source_order() {
        let p = pipeline(
            vec!["sistem satu", "lambat", "sistem dua", "sistem tiga"],
            0.0,
        );
        let report = p
            .run("com.example.app", FilterMode::Apply)
            .await
            .unwrap()
            .unwrap();

        let reviews: Vec<&str> = report.rows.iter().map(|r| r.review.as_str()).collect();
        assert_eq!(reviews, vec!["sistem satu", "sistem dua", "sistem tiga"]);
        let indexes: Vec<usize> = report.rows.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_bounded_concurrency_preserves_order() {
        let mut config = Config::default();
        config.translate.max_in_flight = 4;

        let p = Pipeline::with_collaborators(
            config,
            Box::new(StaticSource(vec!["sistem a", "sistem b", "sistem c"])),
            Box::new(EchoTranslator),
            Box::new(FixedScorer(0.3)),
        )
        .unwrap();

        let report = p
            .run("com.example.app", FilterMode::Apply)
            .await
            .unwrap()
            .unwrap();
        let translated: Vec<&str> = report.rows.iter().map(|r| r.translated.as_str()).collect();
        assert_eq!(translated, vec!["en:sistem a", "en:sistem b", "en:sistem c"]);
    }
}
