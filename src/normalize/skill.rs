use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

/// Glyphs treated as leading list markers on raw skill strings. The set is
/// what shows up in scraped resume exports, not an exhaustive catalog.
pub const DEFAULT_BULLET_GLYPHS: &[char] = &[
    '•', '-', '*', '+', '>', '◦', '‣', '⁃', '⦿', '⦾', '⁌', '⁍', '⧫', '⧪', '⸰',
    '▪', '▫', '►', '➢', '➣', '➤', '·', '⋄', '⬧', '⬦', '⬥', '⭐', '➜', '➝', '➞',
    '✦', '✧', '❋', '❊', '★', '☆', '◆',
];

/// Cleans, keys, validates and deduplicates raw skill strings.
pub struct SkillNormalizer {
    bullet_glyphs: Vec<char>,
}

impl Default for SkillNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillNormalizer {
    pub fn new() -> Self {
        Self {
            bullet_glyphs: DEFAULT_BULLET_GLYPHS.to_vec(),
        }
    }

    /// Replaces the glyph set stripped from the front of raw strings.
    pub fn with_bullet_glyphs(glyphs: Vec<char>) -> Self {
        Self { bullet_glyphs: glyphs }
    }

    /// Strips leading bullet glyphs, then trims surrounding whitespace.
    /// Glyphs inside the string are left alone.
    pub fn clean(&self, raw: &str) -> String {
        raw.trim_start_matches(|c: char| c.is_whitespace() || self.bullet_glyphs.contains(&c))
            .trim()
            .to_string()
    }

    /// Comparison key for deduplication: lowercased, punctuation stripped,
    /// whitespace collapsed, then folded to ASCII by dropping combining
    /// marks. Characters with no ASCII base form disappear entirely.
    pub fn normalize_key(&self, skill: &str) -> String {
        let stripped: String = skill
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();
        let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        collapsed.nfkd().filter(|c| c.is_ascii()).collect()
    }

    /// A key survives when it is non-empty, not digits only, and at least
    /// two characters long. The key is pure ASCII, so byte length is
    /// character length here.
    pub fn is_valid(&self, key: &str) -> bool {
        !key.is_empty() && key.len() >= 2 && !key.bytes().all(|b| b.is_ascii_digit())
    }

    /// Deduplicates raw strings by comparison key, first occurrence wins.
    ///
    /// Returns the retained cleaned display strings in first-seen order;
    /// invalid entries and later duplicates are dropped, whatever their
    /// raw spelling.
    pub fn dedupe<I, S>(&self, raw_skills: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut kept = Vec::new();
        for raw in raw_skills {
            let cleaned = self.clean(raw.as_ref());
            let key = self.normalize_key(&cleaned);
            if !self.is_valid(&key) || !seen.insert(key) {
                continue;
            }
            kept.push(cleaned);
        }
        kept
    }
}
