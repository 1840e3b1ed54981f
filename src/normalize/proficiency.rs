use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Self-assessment codes that pass through as-is, just uppercased.
static A_LEVEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^a[1-5]$").unwrap());

/// Every known free-text spelling mapped onto its canonical level.
static SYNONYMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Beginner variations
        ("beginner", "Beginner"),
        ("basic", "Beginner"),
        ("elementary", "Beginner"),
        ("novice", "Beginner"),
        ("fundamental", "Beginner"),
        // Intermediate variations
        ("intermediate", "Intermediate"),
        ("medium", "Intermediate"),
        ("mid", "Intermediate"),
        ("mid level", "Intermediate"),
        ("mid-level", "Intermediate"),
        // Advanced variations
        ("advanced", "Advanced"),
        ("advance", "Advanced"),
        ("expert", "Advanced"),
        ("fluent", "Advanced"),
        ("proficient", "Advanced"),
        ("professional", "Advanced"),
    ])
});

/// Maps a raw proficiency token onto its canonical level.
///
/// Returns `None` for anything outside the known vocabulary; callers treat
/// that as "no stated proficiency", never as an error.
pub fn normalize_proficiency(raw: &str) -> Option<String> {
    let token = raw.trim().to_lowercase();
    if token.is_empty() {
        return None;
    }
    if A_LEVEL.is_match(&token) {
        return Some(token.to_uppercase());
    }
    SYNONYMS.get(token.as_str()).map(|level| level.to_string())
}
