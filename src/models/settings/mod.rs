// Settings module
// Application settings loaded from config.toml

use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// Where the event list is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Json,
    Sqlite,
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::Json
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub storage: StorageBackend,
    /// Overrides the platform data directory when set
    pub data_dir: Option<PathBuf>,
    /// Create the demo events the first time the store is opened
    pub seed_sample_events: bool,
    /// Default `env_logger` filter; `RUST_LOG` still wins
    pub log_filter: String,
    /// chrono format string for target dates on cards
    pub date_format: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            data_dir: None,
            seed_sample_events: true,
            log_filter: "warn".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl AppSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.log_filter.trim().is_empty() {
            return Err("log_filter cannot be empty".to_string());
        }
        if self.date_format.trim().is_empty() {
            return Err("date_format cannot be empty".to_string());
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(format!("date_format '{}' is not a valid format", self.date_format));
        }
        Ok(())
    }
}
