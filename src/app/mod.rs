pub mod languages;
pub mod skills;

pub use languages::LanguageCleanup;
pub use skills::run_skills_cleanup;
