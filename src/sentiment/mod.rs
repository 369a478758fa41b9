//! Sentiment polarity scoring
//!
//! The pipeline treats the scorer as an injectable collaborator behind the
//! [`SentimentScorer`] trait, constructed once per run. The default
//! implementation is a lexicon-based scorer over translated (English) review
//! text: word valences are summed and compressed into (-1, 1) with the usual
//! compound normalization `sum / sqrt(sum^2 + alpha)`.

use std::collections::HashMap;
use thiserror::Error;

pub mod likert;

pub use likert::LikertScale;

/// Errors raised by a sentiment scorer backend
#[derive(Error, Debug)]
pub enum SentimentError {
    /// Scorer backend failed (model, lexicon, external service)
    #[error("scorer backend failed: {0}")]
    Backend(String),
}

/// Compound polarity scorer, approx [-1, 1]
pub trait SentimentScorer: Send + Sync {
    /// Score one text; negative values indicate negative sentiment
    fn score(&self, text: &str) -> Result<f64, SentimentError>;
}

/// Normalization constant for the compound score, matching the customary
/// valence-sum compression
const COMPOUND_ALPHA: f64 = 15.0;

/// Tokens that flip the valence of the following sentiment word
const NEGATORS: &[&str] = &["not", "no", "never", "dont", "doesnt", "cant", "wont", "isnt"];

/// Word valences in [-5, 5], AFINN-style, covering vocabulary common in
/// translated app-store reviews
const WORD_VALENCES: &[(&str, f64)] = &[
    ("amazing", 4.0),
    ("awesome", 4.0),
    ("excellent", 3.0),
    ("fantastic", 4.0),
    ("perfect", 3.0),
    ("love", 3.0),
    ("loved", 3.0),
    ("best", 3.0),
    ("great", 3.0),
    ("wonderful", 4.0),
    ("good", 3.0),
    ("nice", 3.0),
    ("helpful", 2.0),
    ("helps", 2.0),
    ("help", 2.0),
    ("useful", 2.0),
    ("easy", 2.0),
    ("easier", 2.0),
    ("simple", 1.0),
    ("fast", 2.0),
    ("smooth", 2.0),
    ("convenient", 2.0),
    ("practical", 2.0),
    ("satisfied", 2.0),
    ("satisfying", 2.0),
    ("happy", 3.0),
    ("like", 2.0),
    ("likes", 2.0),
    ("recommend", 2.0),
    ("recommended", 2.0),
    ("thanks", 2.0),
    ("thank", 2.0),
    ("works", 2.0),
    ("working", 1.0),
    ("reliable", 2.0),
    ("clear", 1.0),
    ("complete", 1.0),
    ("informative", 2.0),
    ("accurate", 2.0),
    ("improved", 2.0),
    ("improvement", 1.0),
    ("facilitates", 2.0),
    ("cool", 1.0),
    ("ok", 1.0),
    ("okay", 1.0),
    ("fine", 1.0),
    ("bad", -3.0),
    ("worst", -3.0),
    ("worse", -3.0),
    ("terrible", -3.0),
    ("horrible", -3.0),
    ("awful", -3.0),
    ("hate", -3.0),
    ("hated", -3.0),
    ("useless", -2.0),
    ("slow", -2.0),
    ("lag", -2.0),
    ("laggy", -2.0),
    ("lags", -2.0),
    ("crash", -3.0),
    ("crashes", -3.0),
    ("crashed", -3.0),
    ("error", -2.0),
    ("errors", -2.0),
    ("bug", -2.0),
    ("buggy", -3.0),
    ("bugs", -2.0),
    ("broken", -3.0),
    ("fail", -2.0),
    ("fails", -2.0),
    ("failed", -2.0),
    ("failure", -2.0),
    ("annoying", -2.0),
    ("confusing", -2.0),
    ("complicated", -2.0),
    ("difficult", -1.0),
    ("hard", -1.0),
    ("stuck", -2.0),
    ("freeze", -2.0),
    ("freezes", -2.0),
    ("frozen", -2.0),
    ("problem", -2.0),
    ("problems", -2.0),
    ("disappointed", -2.0),
    ("disappointing", -2.0),
    ("poor", -2.0),
    ("waste", -1.0),
    ("wasted", -2.0),
    ("wrong", -2.0),
    ("scam", -2.0),
    ("spam", -2.0),
    ("ads", -1.0),
    ("intrusive", -2.0),
    ("unusable", -3.0),
    ("uninstall", -2.0),
    ("uninstalled", -2.0),
];

/// Lexicon-based compound polarity scorer
///
/// Pure and deterministic; a single-token negation window flips the valence
/// of the following sentiment word ("not good" scores negative).
pub struct LexiconScorer {
    lexicon: HashMap<&'static str, f64>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            lexicon: WORD_VALENCES.iter().copied().collect(),
        }
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn valence_sum(&self, tokens: &[String]) -> f64 {
        let mut sum = 0.0;
        for (i, token) in tokens.iter().enumerate() {
            if let Some(valence) = self.lexicon.get(token.as_str()) {
                let negated = i > 0 && NEGATORS.contains(&tokens[i - 1].as_str());
                sum += if negated { -valence } else { *valence };
            }
        }
        sum
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<f64, SentimentError> {
        let tokens = Self::tokenize(text);
        let sum = self.valence_sum(&tokens);
        Ok(sum / (sum * sum + COMPOUND_ALPHA).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_neutral() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score("").unwrap(), 0.0);
        assert_eq!(scorer.score("the quick brown fox").unwrap(), 0.0);
    }

    #[test]
    fn test_positive_and_negative() {
        let scorer = LexiconScorer::new();
        let pos = scorer.score("This system really helps users, very good").unwrap();
        let neg = scorer.score("The app is slow and crashes constantly").unwrap();
        assert!(pos > 0.0);
        assert!(neg < 0.0);
    }

    #[test]
    fn test_score_is_bounded() {
        let scorer = LexiconScorer::new();
        let piled_on = "amazing awesome fantastic wonderful love best great ".repeat(20);
        let score = scorer.score(&piled_on).unwrap();
        assert!(score > 0.9 && score < 1.0);
    }

    #[test]
    fn test_negation_flips_valence() {
        let scorer = LexiconScorer::new();
        let plain = scorer.score("good application").unwrap();
        let negated = scorer.score("not good application").unwrap();
        assert!(plain > 0.0);
        assert!(negated < 0.0);
    }

    #[test]
    fn test_deterministic() {
        let scorer = LexiconScorer::new();
        let a = scorer.score("very helpful and easy to use").unwrap();
        let b = scorer.score("very helpful and easy to use").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_punctuation_ignored_by_tokenizer() {
        let scorer = LexiconScorer::new();
        let bare = scorer.score("good").unwrap();
        let decorated = scorer.score("good!!!").unwrap();
        assert_eq!(bare, decorated);
    }
}
