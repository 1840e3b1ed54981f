use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection};

use crate::domain::{LanguageEntry, ProfileRecord};
use crate::error::{CleanupError, Result};
use crate::storage::ProfileStore;

/// SQLite-backed profile store.
///
/// Profiles live in one table with the languages array serialized into a
/// JSON text column. The connection is held for the lifetime of the store
/// and closed on drop, success or failure alike.
pub struct SqliteProfileStore {
    conn: Arc<Mutex<Connection>>,
    table: String,
}

impl SqliteProfileStore {
    /// Opens the database file, creating it and the default table as needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_table(path, "profiles")
    }

    /// Opens the database file against a caller-chosen table.
    pub fn open_with_table<P: AsRef<Path>>(path: P, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(&format!(
            r#"
            PRAGMA journal_mode=WAL;
            CREATE TABLE IF NOT EXISTS {table} (
                id        TEXT PRIMARY KEY,
                source    TEXT NOT NULL,
                languages TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_{table}_source ON {table} (source);
            "#,
        ))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            table: table.to_string(),
        })
    }

    /// Inserts or replaces one profile row. Seeding helper for tests and
    /// data loading; the cleanup itself never creates profiles.
    pub fn insert_profile(
        &self,
        id: &str,
        source: &str,
        languages: Option<&serde_json::Value>,
    ) -> Result<()> {
        let serialized = match languages {
            Some(value) => Some(serde_json::to_string(value)?),
            None => None,
        };
        let conn = self.conn.lock().unwrap();
        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO {} (id, source, languages) VALUES (?1, ?2, ?3)",
                self.table
            ),
            params![id, source, serialized],
        )?;
        Ok(())
    }
}

/// The table name is interpolated into SQL, so it must stay a plain
/// identifier.
fn validate_table_name(table: &str) -> Result<()> {
    let mut chars = table.chars();
    let head_ok = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_');
    if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(CleanupError::Config(format!(
            "Invalid table name '{}'",
            table
        )))
    }
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn count_profiles(&self, source: &str) -> Result<u64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE source = ?1", self.table),
            params![source],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    async fn fetch_profiles(
        &self,
        source: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<ProfileRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT id, languages FROM {} WHERE source = ?1 ORDER BY id LIMIT ?2 OFFSET ?3",
            self.table
        ))?;
        let mut rows = stmt.query(params![source, limit as i64, offset as i64])?;
        let mut profiles = Vec::new();
        while let Some(row) = rows.next()? {
            let id: String = row.get(0)?;
            let raw: Option<String> = row.get(1)?;
            // Invalid JSON in the column fails the whole fetch, not just
            // this row
            let languages = match raw {
                Some(text) => Some(serde_json::from_str(&text)?),
                None => None,
            };
            profiles.push(ProfileRecord { id, languages });
        }
        Ok(profiles)
    }

    async fn update_languages(&self, profile_id: &str, languages: &[LanguageEntry]) -> Result<()> {
        let serialized = serde_json::to_string(languages)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            &format!("UPDATE {} SET languages = ?1 WHERE id = ?2", self.table),
            params![serialized, profile_id],
        )?;
        Ok(())
    }
}
