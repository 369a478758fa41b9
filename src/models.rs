// Core data structures for the ulas review pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sentiment::LikertScale;

/// A single raw review as returned by the review source
///
/// Only the review content is retained; every other field of the source
/// payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Review {
    pub content: String,
}

impl Review {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// One page of results from the review source
///
/// The continuation token is an opaque cursor; its absence signals that the
/// source is exhausted.
#[derive(Debug, Clone, Default)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    pub next_token: Option<String>,
}

/// Review sort order supported by the Play Store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    MostRelevant = 1,
    Newest = 2,
    Rating = 3,
}

impl SortOrder {
    /// Numeric code used by the Play Store RPC payload
    pub fn rpc_code(&self) -> u8 {
        *self as u8
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MostRelevant => "relevance",
            Self::Newest => "newest",
            Self::Rating => "rating",
        }
    }

    /// Create from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relevance" | "most_relevant" => Some(Self::MostRelevant),
            "newest" => Some(Self::Newest),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the analysis result table
///
/// Assembled once per filtered review; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRow {
    /// 1-based position in the filtered sequence
    pub index: usize,

    /// Normalized, keyword-filtered review in the source language
    pub review: String,

    /// Machine translation of the review
    pub translated: String,

    /// Compound polarity score in approx [-1, 1]
    pub score: f64,

    /// Likert satisfaction value derived from the score
    pub likert: LikertScale,
}

impl ResultRow {
    /// Human-readable satisfaction label for this row
    pub fn label(&self) -> &'static str {
        self.likert.label()
    }
}

/// Full result of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub rows: Vec<ResultRow>,

    /// Arithmetic mean of the sentiment scores; `None` when no review
    /// survived the filter (surfaced as "no data", never NaN)
    pub mean_score: Option<f64>,

    /// Frequency of each satisfaction label, first-seen order preserved
    pub label_counts: Vec<(String, usize)>,

    pub generated_at: DateTime<Utc>,
}

impl RunReport {
    /// Build a report from assembled rows, computing the summary statistics
    pub fn from_rows(rows: Vec<ResultRow>) -> Self {
        let mean_score = if rows.is_empty() {
            None
        } else {
            Some(rows.iter().map(|r| r.score).sum::<f64>() / rows.len() as f64)
        };

        let mut label_counts: Vec<(String, usize)> = Vec::new();
        for row in &rows {
            let label = row.label();
            match label_counts.iter_mut().find(|(l, _)| l == label) {
                Some((_, count)) => *count += 1,
                None => label_counts.push((label.to_string(), 1)),
            }
        }

        Self {
            rows,
            mean_score,
            label_counts,
            generated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
