use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One spoken-language claim on a profile.
///
/// Raw entries arrive with proficiency markers embedded in the name
/// ("French (B2)", "spanish - advanced"). After cleanup the name is bare
/// and the proficiency, when known, is one of the canonical levels.
/// Both fields are always serialized, so a persisted entry carries an
/// explicit null for an absent proficiency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub proficiency: Option<String>,
}

impl LanguageEntry {
    pub fn new(language: impl Into<String>, proficiency: Option<String>) -> Self {
        Self {
            language: Some(language.into()),
            proficiency,
        }
    }
}

/// A profile document as read from the store.
///
/// The languages field stays raw JSON here; the cleanup interprets it per
/// profile so one malformed document cannot poison a whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    #[serde(default)]
    pub languages: Option<serde_json::Value>,
}

/// Terminal state of a cleanup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Completed,
    Failed,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Completed => write!(f, "completed"),
            RunStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Summary of one language cleanup run.
///
/// A failed run still carries the counters accumulated before the abort;
/// writes issued up to that point stay written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupReport {
    pub run_id: Uuid,
    pub total_updates: u64,
    pub total_errors: u64,
    /// Wall-clock duration in seconds.
    pub execution_time: f64,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Summary of one skills cleanup run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsReport {
    pub total_rows: u64,
    pub unique_skills: u64,
    /// Wall-clock duration in seconds.
    pub execution_time: f64,
    pub output_file: String,
}
