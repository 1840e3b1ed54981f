use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::LanguageEntry;
use crate::normalize::proficiency::normalize_proficiency;

/// Connective used when several languages are packed into one entry
/// ("English and French"). Requires surrounding whitespace so names like
/// "andalusian" survive.
static AND_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+and\s+").unwrap());

/// Marker patterns tried in order against a lowercased candidate. The first
/// pattern that matches wins; every occurrence of that one pattern is then
/// removed from the candidate.
static MARKER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Anything in parentheses, wherever it sits
        Regex::new(r"\((.*?)\)").unwrap(),
        // Known token after a hyphen
        Regex::new(r"- *(beginner|basic|intermediate|advance[d]?|a[1-5])").unwrap(),
        // Known token after a comma
        Regex::new(r", *(beginner|basic|intermediate|advance[d]?|a[1-5])").unwrap(),
        // Known token as the final word
        Regex::new(r" (beginner|basic|intermediate|advance[d]?|a[1-5])$").unwrap(),
    ]
});

/// Splits a raw language string into atomic name candidates.
///
/// Commas split first and each fragment is trimmed before the "and"
/// connective applies, so a connective at a fragment edge never splits.
/// Candidates are trimmed and empties dropped.
pub fn split_candidates(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .flat_map(|fragment| AND_SPLIT.split(fragment))
        .map(|candidate| candidate.trim().to_string())
        .filter(|candidate| !candidate.is_empty())
        .collect()
}

/// Pulls an embedded proficiency marker out of one candidate.
///
/// Returns the cleaned (lowercased, trimmed) name and the marker text
/// exactly as captured, possibly padded and still an unknown token;
/// normalizing it is the caller's business.
pub fn extract_embedded_proficiency(candidate: &str) -> (String, Option<String>) {
    let lowered = candidate.trim().to_lowercase();
    for pattern in MARKER_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(&lowered) {
            let marker = captures.get(1).map(|m| m.as_str().to_string());
            let cleaned = pattern.replace_all(&lowered, "").trim().to_string();
            return (cleaned, marker);
        }
    }
    (lowered, None)
}

/// Rewrites raw language entries into their cleaned form.
///
/// Entries without a usable language name are dropped. Packed names fan
/// out into one entry per language; each keeps the proficiency found in
/// its own text when it normalizes to a known level, otherwise the
/// proficiency stated on the source entry.
pub fn normalize_entries(entries: &[LanguageEntry]) -> Vec<LanguageEntry> {
    let mut cleaned = Vec::new();
    for entry in entries {
        let raw_name = match entry.language.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => continue,
        };
        let fallback = entry.proficiency.as_deref().and_then(normalize_proficiency);
        for candidate in split_candidates(raw_name) {
            let (name, marker) = extract_embedded_proficiency(&candidate);
            if name.is_empty() {
                continue;
            }
            let proficiency = marker
                .as_deref()
                .and_then(normalize_proficiency)
                .or_else(|| fallback.clone());
            cleaned.push(LanguageEntry {
                language: Some(name),
                proficiency,
            });
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_commas_then_and() {
        assert_eq!(
            split_candidates("English and French, German - beginner"),
            vec!["English", "French", "German - beginner"]
        );
    }

    #[test]
    fn and_split_is_case_insensitive_and_needs_whitespace() {
        assert_eq!(
            split_candidates("Spanish AND Portuguese"),
            vec!["Spanish", "Portuguese"]
        );
        // No surrounding whitespace, no split
        assert_eq!(split_candidates("andalusian"), vec!["andalusian"]);
    }

    #[test]
    fn comma_fragments_are_trimmed_before_the_and_split() {
        // Once the fragment is trimmed the connective sits at its edge with
        // no surrounding whitespace, so it stays part of the name
        assert_eq!(
            split_candidates("english, and french"),
            vec!["english", "and french"]
        );
        assert_eq!(
            split_candidates("english and , french"),
            vec!["english and", "french"]
        );
    }

    #[test]
    fn empty_fragments_are_dropped() {
        assert_eq!(split_candidates("english,, french ,"), vec!["english", "french"]);
        assert!(split_candidates("  ").is_empty());
    }

    #[test]
    fn extracts_parenthesized_marker() {
        assert_eq!(
            extract_embedded_proficiency("French (B2)"),
            ("french".to_string(), Some("b2".to_string()))
        );
    }

    #[test]
    fn marker_is_captured_verbatim() {
        assert_eq!(
            extract_embedded_proficiency("french ( b2 )"),
            ("french".to_string(), Some(" b2 ".to_string()))
        );
    }

    #[test]
    fn extracts_marker_after_hyphen() {
        assert_eq!(
            extract_embedded_proficiency("spanish - advanced"),
            ("spanish".to_string(), Some("advanced".to_string()))
        );
        assert_eq!(
            extract_embedded_proficiency("portuguese-basic"),
            ("portuguese".to_string(), Some("basic".to_string()))
        );
    }

    #[test]
    fn extracts_marker_after_comma() {
        assert_eq!(
            extract_embedded_proficiency("german, basic"),
            ("german".to_string(), Some("basic".to_string()))
        );
    }

    #[test]
    fn extracts_trailing_marker_word() {
        assert_eq!(
            extract_embedded_proficiency("italian advanced"),
            ("italian".to_string(), Some("advanced".to_string()))
        );
        // Mid-string token is not a trailing marker
        assert_eq!(
            extract_embedded_proficiency("basic english teaching"),
            ("basic english teaching".to_string(), None)
        );
    }

    #[test]
    fn first_matching_pattern_wins() {
        // The parenthesized marker is taken even though a hyphen marker follows
        assert_eq!(
            extract_embedded_proficiency("english(fluent) - a2"),
            ("english - a2".to_string(), Some("fluent".to_string()))
        );
    }

    #[test]
    fn every_occurrence_of_the_winning_pattern_is_removed() {
        assert_eq!(
            extract_embedded_proficiency("french (native) (b2)"),
            ("french".to_string(), Some("native".to_string()))
        );
    }

    #[test]
    fn packed_entry_fans_out() {
        let entries = vec![LanguageEntry::new("English and French, German - beginner", None)];
        assert_eq!(
            normalize_entries(&entries),
            vec![
                LanguageEntry::new("english", None),
                LanguageEntry::new("french", None),
                LanguageEntry::new("german", Some("Beginner".to_string())),
            ]
        );
    }

    #[test]
    fn unrecognized_marker_falls_back_to_entry_proficiency() {
        let entries = vec![LanguageEntry::new("french (b2)", Some("intermediate".to_string()))];
        assert_eq!(
            normalize_entries(&entries),
            vec![LanguageEntry::new("french", Some("Intermediate".to_string()))]
        );
    }

    #[test]
    fn padded_marker_still_normalizes() {
        let entries = vec![LanguageEntry::new("German ( basic )", None)];
        assert_eq!(
            normalize_entries(&entries),
            vec![LanguageEntry::new("german", Some("Beginner".to_string()))]
        );
    }

    #[test]
    fn recognized_marker_beats_entry_proficiency() {
        let entries = vec![LanguageEntry::new("spanish - advanced", Some("basic".to_string()))];
        assert_eq!(
            normalize_entries(&entries),
            vec![LanguageEntry::new("spanish", Some("Advanced".to_string()))]
        );
    }

    #[test]
    fn entries_without_a_language_are_dropped() {
        let entries = vec![
            LanguageEntry {
                language: None,
                proficiency: Some("basic".to_string()),
            },
            LanguageEntry::new("   ", Some("basic".to_string())),
            LanguageEntry::new("dutch", None),
        ];
        assert_eq!(normalize_entries(&entries), vec![LanguageEntry::new("dutch", None)]);
    }

    #[test]
    fn marker_only_candidate_yields_nothing() {
        let entries = vec![LanguageEntry::new("(b2)", None)];
        assert!(normalize_entries(&entries).is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let entries = vec![
            LanguageEntry::new("english", Some("Advanced".to_string())),
            LanguageEntry::new("german", Some("A3".to_string())),
            LanguageEntry::new("french", None),
        ];
        assert_eq!(normalize_entries(&entries), entries);
    }
}
