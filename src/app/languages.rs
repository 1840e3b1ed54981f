use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::config::{DEFAULT_BATCH_SIZE, DEFAULT_SOURCE_FILTER};
use crate::domain::{CleanupReport, LanguageEntry, ProfileRecord, RunStatus};
use crate::normalize::language::normalize_entries;
use crate::storage::ProfileStore;

/// Batch job that rewrites the languages field on every matching profile.
pub struct LanguageCleanup {
    store: Arc<dyn ProfileStore>,
    source: String,
    batch_size: u64,
}

impl std::fmt::Debug for LanguageCleanup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageCleanup")
            .field("store", &"<Arc<dyn ProfileStore>>")
            .field("source", &self.source)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

#[derive(Debug, Default)]
struct Counters {
    updates: u64,
    errors: u64,
}

impl LanguageCleanup {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            store,
            source: DEFAULT_SOURCE_FILTER.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Restricts the run to profiles carrying this source tag.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Profiles fetched per batch. Batches only pace progress reporting;
    /// they carry no transactional meaning.
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Runs the cleanup over every profile with the configured source tag.
    ///
    /// Profiles that fail individually are counted and skipped. Only a
    /// store-level failure aborts the run, and even then the report keeps
    /// the counters accumulated up to the abort; writes already issued
    /// stay written.
    #[instrument(skip(self))]
    pub async fn run(&self) -> CleanupReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let started = Instant::now();
        info!(run_id = %run_id, source = %self.source, batch_size = self.batch_size, "Starting language cleanup run");

        let mut counters = Counters::default();
        let outcome = self.run_inner(&mut counters).await;

        let execution_time = started.elapsed().as_secs_f64();
        let (status, error) = match outcome {
            Ok(()) => {
                info!(
                    run_id = %run_id,
                    total_updates = counters.updates,
                    total_errors = counters.errors,
                    execution_time,
                    "Language cleanup run completed"
                );
                (RunStatus::Completed, None)
            }
            Err(e) => {
                error!(run_id = %run_id, "Language cleanup run failed: {}", e);
                (RunStatus::Failed, Some(e.to_string()))
            }
        };

        CleanupReport {
            run_id,
            total_updates: counters.updates,
            total_errors: counters.errors,
            execution_time,
            status,
            error,
            started_at,
            finished_at: Utc::now(),
        }
    }

    async fn run_inner(&self, counters: &mut Counters) -> anyhow::Result<()> {
        let total = self.store.count_profiles(&self.source).await?;
        info!(total, source = %self.source, "Found profiles to process");

        let mut offset = 0u64;
        loop {
            let batch = self
                .store
                .fetch_profiles(&self.source, offset, self.batch_size)
                .await?;
            if batch.is_empty() {
                break;
            }
            let fetched = batch.len() as u64;

            for profile in &batch {
                match self.process_profile(profile).await {
                    Ok(true) => counters.updates += 1,
                    Ok(false) => {}
                    Err(e) => {
                        counters.errors += 1;
                        error!(profile_id = %profile.id, "Failed to process profile: {}", e);
                    }
                }
            }

            offset += fetched;
            let percent = (offset.min(total) * 100) / total.max(1);
            info!(
                processed = offset,
                total,
                percent,
                updates = counters.updates,
                errors = counters.errors,
                "Processed batch"
            );

            if fetched < self.batch_size {
                break;
            }
        }
        Ok(())
    }

    /// Returns true when the profile was rewritten.
    ///
    /// The dirty check compares the serialized cleaned entries against the
    /// raw stored value, so entries outside the canonical two-key shape
    /// count as dirty and converge on rewrite.
    async fn process_profile(&self, profile: &ProfileRecord) -> anyhow::Result<bool> {
        let raw = match profile.languages.as_ref() {
            Some(value) => value,
            None => return Ok(false),
        };
        let current: Vec<LanguageEntry> = serde_json::from_value(raw.clone())?;
        let cleaned = normalize_entries(&current);
        if serde_json::to_value(&cleaned)? == *raw {
            debug!(profile_id = %profile.id, "Languages already clean");
            return Ok(false);
        }
        self.store.update_languages(&profile.id, &cleaned).await?;
        debug!(profile_id = %profile.id, entries = cleaned.len(), "Rewrote languages");
        Ok(true)
    }
}
