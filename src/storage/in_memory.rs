use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{LanguageEntry, ProfileRecord};
use crate::error::Result;
use crate::storage::ProfileStore;

#[derive(Debug, Clone)]
struct StoredProfile {
    source: String,
    languages: Option<serde_json::Value>,
}

/// In-memory profile store for development and testing.
///
/// A BTreeMap keeps profiles in id order so pagination behaves like the
/// SQLite adapter. The write counter lets tests assert the no-op
/// guarantee.
pub struct InMemoryProfileStore {
    profiles: Arc<Mutex<BTreeMap<String, StoredProfile>>>,
    updates: AtomicU64,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(Mutex::new(BTreeMap::new())),
            updates: AtomicU64::new(0),
        }
    }

    /// Seeds one profile.
    pub fn insert_profile(&self, id: &str, source: &str, languages: Option<serde_json::Value>) {
        let mut profiles = self.profiles.lock().unwrap();
        profiles.insert(
            id.to_string(),
            StoredProfile {
                source: source.to_string(),
                languages,
            },
        );
    }

    /// Current languages value for one profile, if any.
    pub fn get_languages(&self, id: &str) -> Option<serde_json::Value> {
        let profiles = self.profiles.lock().unwrap();
        profiles.get(id).and_then(|profile| profile.languages.clone())
    }

    /// Number of updates that landed so far.
    pub fn update_count(&self) -> u64 {
        self.updates.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn count_profiles(&self, source: &str) -> Result<u64> {
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles.values().filter(|p| p.source == source).count() as u64)
    }

    async fn fetch_profiles(
        &self,
        source: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<ProfileRecord>> {
        let profiles = self.profiles.lock().unwrap();
        let page = profiles
            .iter()
            .filter(|(_, p)| p.source == source)
            .skip(offset as usize)
            .take(limit as usize)
            .map(|(id, p)| ProfileRecord {
                id: id.clone(),
                languages: p.languages.clone(),
            })
            .collect();
        Ok(page)
    }

    async fn update_languages(&self, profile_id: &str, languages: &[LanguageEntry]) -> Result<()> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(profile) = profiles.get_mut(profile_id) {
            profile.languages = Some(serde_json::to_value(languages)?);
            self.updates.fetch_add(1, Ordering::SeqCst);
            debug!("Updated languages for profile {}", profile_id);
        }
        Ok(())
    }
}
