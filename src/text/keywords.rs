//! Whole-word keyword filtering for normalized reviews
//!
//! A review is kept when at least one keyword phrase occurs in it bounded by
//! word boundaries on both sides, so "sistem" matches "sistem informasi" but
//! never the inside of "ekosistem". Keywords are tested in insertion order
//! and the first match short-circuits.

use regex::Regex;

/// Default keyword phrases, lowercase, insertion-ordered
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "penggunaannya",
    "penggunaan",
    "memudahkan",
    "pengguna",
    "informasi",
    "sistem informasi",
    "dapat memudahkan pengguna",
    "sistem",
];

/// A fixed, ordered set of literal keyword phrases with pre-compiled
/// whole-word matchers
#[derive(Debug, Clone)]
pub struct KeywordSet {
    keywords: Vec<String>,
    patterns: Vec<Regex>,
}

impl KeywordSet {
    /// Build a keyword set, compiling one word-boundary-anchored pattern per
    /// phrase
    ///
    /// Phrases are lowercased on construction; reviews are lowercased during
    /// normalization, so a mixed-case phrase would otherwise never match.
    ///
    /// # Errors
    ///
    /// Returns `regex::Error` if a compiled pattern is rejected (not
    /// expected for escaped literals, but surfaced rather than swallowed)
    pub fn new<I, S>(words: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = words
            .into_iter()
            .map(|w| w.into().to_lowercase())
            .collect();
        let patterns = keywords
            .iter()
            .map(|kw| Regex::new(&format!(r"\b{}\b", regex::escape(kw))))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { keywords, patterns })
    }

    /// Number of keyword phrases in the set
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Iterate over the keyword phrases in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Find the first keyword (in set order) with a whole-word occurrence in
    /// the review
    pub fn first_match<'a>(&'a self, review: &str) -> Option<&'a str> {
        self.patterns
            .iter()
            .position(|p| p.is_match(review))
            .map(|i| self.keywords[i].as_str())
    }

    /// Check whether any keyword matches the review
    pub fn matches(&self, review: &str) -> bool {
        self.first_match(review).is_some()
    }

    /// Retain the reviews that contain at least one keyword
    ///
    /// Order-preserving and non-destructive; each review is included at most
    /// once even when several keywords match, because the first match
    /// short-circuits.
    pub fn filter(&self, reviews: &[String]) -> Vec<String> {
        reviews
            .iter()
            .filter(|review| {
                if let Some(keyword) = self.first_match(review.as_str()) {
                    tracing::debug!(keyword, "review matched keyword");
                    true
                } else {
                    false
                }
            })
            .cloned()
            .collect()
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        // Escaped literals always compile
        Self::new(DEFAULT_KEYWORDS.iter().copied()).unwrap()
    }
}
