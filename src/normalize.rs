// src/normalize.rs

// Field transform library: pure, total functions turning raw scraped text
// into typed values. Malformed input yields None, never a panic or error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::report::model::BureauMap;

// --- Regex Patterns (Lazy Static) ---

/// A month/day/year date anywhere in the input: 1-2 digit month and day,
/// 4-digit year.
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").expect("Failed to compile DATE_RE")
});

// Narrative score phrasing. Increase phrases carry an optional leading '+';
// decrease phrases put the sign on the digits, which are captured bare and
// negated.
static PROGRESS_UP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:increased|went\s+up)\s+by\s+\+?(\d+)")
        .expect("Failed to compile PROGRESS_UP_RE")
});

static PROGRESS_DOWN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:decreased|dropped|went\s+down)\s+by\s+-(\d+)")
        .expect("Failed to compile PROGRESS_DOWN_RE")
});

static BOOST_POTENTIAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)boost\s+(?:your\s+score\s+)?by\s+(?:up\s+to\s+)?\+?(\d+)")
        .expect("Failed to compile BOOST_POTENTIAL_RE")
});

static SCORE_BOOST_UP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)score\s+(?:boost|change)\s+of\s+\+?(\d+)")
        .expect("Failed to compile SCORE_BOOST_UP_RE")
});

static SCORE_BOOST_DOWN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)score\s+(?:boost|change)\s+of\s+-(\d+)")
        .expect("Failed to compile SCORE_BOOST_DOWN_RE")
});

// --- Transforms ---

/// Extracts a number out of arbitrarily formatted text: `"$652.05"` ->
/// `652.05`, `"+34 pts"` -> `34.0`, `"-168 pts"` -> `-168.0`.
/// Returns None when nothing numeric remains after stripping formatting.
pub fn extract_number(text: &str) -> Option<f64> {
    let filtered: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        .collect();
    if filtered.is_empty() {
        return None;
    }
    filtered.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// [`extract_number`] over an already-typed JSON value: finite numbers pass
/// through unchanged, strings go through text extraction, everything else
/// (including non-finite numbers) is None.
pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => extract_number(s),
        _ => None,
    }
}

/// Finds an `MM/DD/YYYY`-shaped substring anywhere in the input and
/// reformats it as `YYYY-MM-DD`, zero-padding month and day.
///
/// This is pure reformatting with no calendar validation: `"13/45/2025"`
/// becomes `"2025-13-45"`. Validation belongs to consumers that care.
pub fn parse_date(text: &str) -> Option<String> {
    let caps = DATE_RE.captures(text)?;
    Some(format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[1], &caps[2]))
}

/// Trims the input and collapses the empty string and the `"--"` placeholder
/// to None. Anything else is returned trimmed but otherwise verbatim, so
/// currency and percent formatting survive.
pub fn clean_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "--" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// --- Narrative extraction ---

/// Point delta from a score-progress sentence, e.g.
/// "Your score increased by +34 pts since last month" -> 34.
pub fn parse_score_progress(text: &str) -> Option<i64> {
    if let Some(caps) = PROGRESS_UP_RE.captures(text) {
        return caps[1].parse::<i64>().ok();
    }
    if let Some(caps) = PROGRESS_DOWN_RE.captures(text) {
        return caps[1].parse::<i64>().ok().map(|n| -n);
    }
    None
}

/// Point delta from a "score boost of N" sentence.
pub fn parse_score_boost(text: &str) -> Option<i64> {
    if let Some(caps) = SCORE_BOOST_UP_RE.captures(text) {
        return caps[1].parse::<i64>().ok();
    }
    if let Some(caps) = SCORE_BOOST_DOWN_RE.captures(text) {
        return caps[1].parse::<i64>().ok().map(|n| -n);
    }
    None
}

/// Attainable points from a boost-potential sentence, e.g.
/// "could boost your score by up to 25 points" -> 25.
pub fn parse_boost_potential(text: &str) -> Option<i64> {
    BOOST_POTENTIAL_RE
        .captures(text)?
        .get(1)?
        .as_str()
        .parse::<i64>()
        .ok()
}

/// Parses the three bureau score strings into numbers.
pub fn parse_3b_scores(scores: &BureauMap<Option<String>>) -> BureauMap<Option<f64>> {
    scores.map(|raw| raw.as_deref().and_then(extract_number))
}
