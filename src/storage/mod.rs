use async_trait::async_trait;

use crate::domain::{LanguageEntry, ProfileRecord};
use crate::error::Result;

pub mod in_memory;
pub mod sqlite;

pub use in_memory::InMemoryProfileStore;
pub use sqlite::SqliteProfileStore;

/// Storage port for the profile documents the language cleanup rewrites.
///
/// The cleanup never depends on the concrete store; updating an id that no
/// longer exists is a silent no-op, matching document-store update
/// semantics.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Number of profiles carrying the given source tag.
    async fn count_profiles(&self, source: &str) -> Result<u64>;

    /// One page of matching profiles in stable id order.
    async fn fetch_profiles(
        &self,
        source: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<ProfileRecord>>;

    /// Replaces the whole languages array on one profile.
    async fn update_languages(&self, profile_id: &str, languages: &[LanguageEntry]) -> Result<()>;
}
