//! Likert scale mapping for compound polarity scores
//!
//! Partitions the real line into five satisfaction bands. The partition is
//! total and non-overlapping; boundaries are inclusive on the lower side
//! (a score of exactly 0.6 maps to 5, exactly 0.2 to 4, and so on).

use serde::{Deserialize, Serialize};

/// 5-point ordinal satisfaction scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LikertScale {
    /// Score below -0.6
    SangatTidakPuas = 1,
    /// Score in [-0.6, -0.2)
    TidakPuas = 2,
    /// Score in [-0.2, 0.2)
    CukupPuas = 3,
    /// Score in [0.2, 0.6)
    SangatPuas = 4,
    /// Score of 0.6 or above
    SangatPuasSekali = 5,
}

impl LikertScale {
    /// Map a compound polarity score onto the scale
    ///
    /// Total over the real line; every score maps to exactly one variant.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.6 {
            Self::SangatPuasSekali
        } else if score >= 0.2 {
            Self::SangatPuas
        } else if score >= -0.2 {
            Self::CukupPuas
        } else if score >= -0.6 {
            Self::TidakPuas
        } else {
            Self::SangatTidakPuas
        }
    }

    /// Numeric scale value in {1..5}
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Create from a raw scale value
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::SangatTidakPuas),
            2 => Some(Self::TidakPuas),
            3 => Some(Self::CukupPuas),
            4 => Some(Self::SangatPuas),
            5 => Some(Self::SangatPuasSekali),
            _ => None,
        }
    }

    /// Human-readable satisfaction label
    pub fn label(&self) -> &'static str {
        match self {
            Self::SangatTidakPuas => "Sangat Tidak Puas",
            Self::TidakPuas => "Tidak Puas",
            Self::CukupPuas => "Cukup Puas",
            Self::SangatPuas => "Sangat Puas",
            Self::SangatPuasSekali => "Sangat Puas Sekali",
        }
    }

    /// Label lookup for a raw scale value; values outside {1..5} yield
    /// "Unknown" (unreachable through [`LikertScale::from_score`])
    pub fn label_for(value: u8) -> &'static str {
        Self::from_value(value).map_or("Unknown", |scale| scale.label())
    }

    /// All variants in ascending order
    pub fn all() -> [Self; 5] {
        [
            Self::SangatTidakPuas,
            Self::TidakPuas,
            Self::CukupPuas,
            Self::SangatPuas,
            Self::SangatPuasSekali,
        ]
    }
}

impl std::fmt::Display for LikertScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
