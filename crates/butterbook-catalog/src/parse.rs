//! Free-text heuristics for pulling size, salt type, brand, and price out of
//! product names and descriptions.
//!
//! These are best-effort scans over chaotic listing text. Each function
//! returns `None` when nothing recognizable is found; callers decide the
//! default. See [`crate::extract`] for how they compose with structured
//! fields.

use std::sync::LazyLock;

use butterbook_core::ButterType;
use regex::Regex;

/// Pack size: kilograms (`1kg`, `1.5 kg`) or grams (`250g`, `500 grams`).
/// The kilogram branch comes first so `1.5kg` is never read as grams.
static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*kg\b|(\d{2,4})\s*g(?:rams?)?\b").expect("valid size regex")
});

static UNSALTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)unsalted").expect("valid regex"));
static LIGHTLY_SALTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)lightly[\s_-]*salted").expect("valid regex"));
static SALTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)salted").expect("valid regex"));

/// First number in a price string, with an optional trailing pence marker.
/// Thousands-grouped amounts (`1,234.56`) are tried before plain ones.
static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,3}(?:,\d{3})+\.\d+|\d+(?:[.,]\d+)?)\s*(p\b)?")
        .expect("valid price regex")
});

/// Words that end the leading brand sequence of a product name.
const BRAND_STOP_WORDS: &[&str] = &[
    "salted",
    "unsalted",
    "lightly",
    "slightly",
    "butter",
    "spreadable",
    "spread",
    "block",
    "original",
    "pack",
];

/// Longest brand taken from the front of a product name.
const MAX_BRAND_WORDS: usize = 3;

/// Scans `text` for a pack size and returns it in whole grams.
///
/// Recognizes `\d+(\.\d+)?\s*kg` (multiplied by 1000) and
/// `\d{2,4}\s*g(rams?)?`, case-insensitive. The leftmost match wins.
#[must_use]
pub(crate) fn parse_size_grams(text: &str) -> Option<u32> {
    let caps = SIZE_RE.captures(text)?;

    if let Some(kg) = caps.get(1) {
        let value = kg.as_str().parse::<f64>().ok()?;
        return grams_from_f64(value * 1000.0);
    }

    caps.get(2)?
        .as_str()
        .parse::<u32>()
        .ok()
        .filter(|&g| g > 0)
}

/// Rounds a gram amount to a whole number, rejecting non-positive,
/// non-finite, and out-of-range values.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // range-checked before the cast
pub(crate) fn grams_from_f64(value: f64) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }
    let rounded = value.round();
    if rounded < 1.0 || rounded > f64::from(u32::MAX) {
        return None;
    }
    Some(rounded as u32)
}

/// Classifies salt type from free text.
///
/// Precedence: `unsalted`, then `lightly salted`, then `salted`. `"Unsalted"`
/// therefore never reads as salted even though it contains the substring.
#[must_use]
pub(crate) fn classify_butter_type(text: &str) -> Option<ButterType> {
    if UNSALTED_RE.is_match(text) {
        Some(ButterType::Unsalted)
    } else if LIGHTLY_SALTED_RE.is_match(text) {
        Some(ButterType::LightlySalted)
    } else if SALTED_RE.is_match(text) {
        Some(ButterType::Salted)
    } else {
        None
    }
}

/// Takes the leading words of a product name as its brand.
///
/// Stops at the first descriptor word (`salted`, `butter`, ...), the first
/// token that starts with a digit, or the first token with no letters or
/// digits (e.g. a dash). At most three words are taken.
#[must_use]
pub(crate) fn leading_brand(name: &str) -> Option<String> {
    let words: Vec<&str> = name
        .split_whitespace()
        .take_while(|word| {
            let bare: String = word
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            !bare.is_empty()
                && !word.starts_with(|c: char| c.is_ascii_digit())
                && !BRAND_STOP_WORDS.contains(&bare.as_str())
        })
        .take(MAX_BRAND_WORDS)
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Parses a price string such as `"£2.50"`, `"2,50 €"`, or `"85p"`.
///
/// A comma is a decimal separator unless a `.` follows it, in which case it
/// groups thousands. A bare integer followed by `p` is read as pence.
/// Returns `None` when the string holds no number.
#[must_use]
pub(crate) fn parse_price_text(text: &str) -> Option<f64> {
    let caps = PRICE_RE.captures(text)?;
    let raw = caps.get(1)?.as_str();
    let normalized = if raw.contains('.') {
        raw.replace(',', "")
    } else {
        raw.replace(',', ".")
    };
    let value = normalized.parse::<f64>().ok()?;

    let is_pence = caps.get(2).is_some() && !raw.contains(['.', ',']);
    let value = if is_pence { value / 100.0 } else { value };
    Some(value).filter(|v| v.is_finite())
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
