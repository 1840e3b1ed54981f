pub mod language;
pub mod proficiency;
pub mod skill;

pub use language::{extract_embedded_proficiency, normalize_entries, split_candidates};
pub use proficiency::normalize_proficiency;
pub use skill::SkillNormalizer;
