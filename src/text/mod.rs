//! Review text normalization
//!
//! Canonicalizes raw review text before keyword matching: lowercase, strip
//! supplementary-plane symbols (emoji), strip digit runs and punctuation,
//! collapse whitespace. Normalization is pure and idempotent.

use regex::Regex;
use std::sync::LazyLock;

pub mod keywords;

pub use keywords::KeywordSet;

// Pre-compiled regex patterns for performance
static DIGIT_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

static NON_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize raw review text for keyword matching
///
/// Steps, in order:
/// 1. Lowercase the entire string
/// 2. Remove every code point outside the Basic Multilingual Plane
/// 3. Remove every maximal run of decimal digits
/// 4. Remove every character that is not a word character or whitespace
/// 5. Collapse whitespace runs to a single space and trim the ends
///
/// # Examples
///
/// ```
/// use ulas::text::normalize;
///
/// let raw = "Sistem ini sangat membantu pengguna!! \u{1F60A}123";
/// assert_eq!(normalize(raw), "sistem ini sangat membantu pengguna");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let bmp_only = strip_supplementary(&lowered);
    let no_digits = DIGIT_RUN_REGEX.replace_all(&bmp_only, "");
    let word_chars = NON_WORD_REGEX.replace_all(&no_digits, "");
    let collapsed = WHITESPACE_REGEX.replace_all(&word_chars, " ");
    collapsed.trim().to_string()
}

/// Remove every code point in the supplementary planes (U+10000-U+10FFFF)
///
/// This drops most emoji and supplementary symbols. Matching is by code
/// point, never by UTF-8 byte width.
///
/// # Examples
///
/// ```
/// use ulas::text::strip_supplementary;
///
/// assert_eq!(strip_supplementary("bagus \u{1F44D}"), "bagus ");
/// ```
pub fn strip_supplementary(text: &str) -> String {
    text.chars().filter(|c| (*c as u32) < 0x10000).collect()
}

/// Truncate text to max length with ellipsis
///
/// # Examples
///
/// ```
/// use ulas::text::truncate;
///
/// assert_eq!(truncate("Hello World", 5), "He...");
/// assert_eq!(truncate("Hello World", 20), "Hello World");
/// ```
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
