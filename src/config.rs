use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{CleanupError, Result};

pub const DEFAULT_SOURCE_FILTER: &str = "coresignal";
pub const DEFAULT_BATCH_SIZE: u64 = 100;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub skills: SkillsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub table: String,
    pub source_filter: String,
    pub batch_size: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/profiles.db".to_string(),
            table: "profiles".to_string(),
            source_filter: DEFAULT_SOURCE_FILTER.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    pub input: String,
    pub output: String,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            input: "skills_data.csv".to_string(),
            output: "unique_skills.csv".to_string(),
        }
    }
}

impl Config {
    /// Loads config.toml from the working directory, falling back to the
    /// built-in defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Path::new("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::read(path)
    }

    /// Loads an explicitly named config file. Unlike `load`, the file must
    /// exist.
    pub fn load_required(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CleanupError::Config(format!(
                "Config file '{}' not found",
                path.display()
            )));
        }
        Self::read(path)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CleanupError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
