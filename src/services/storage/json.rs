use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Error as SerdeError;

use super::{EventStore, STORAGE_KEY};
use crate::models::countdown_event::CountdownEvent;

/// Event list kept as a pretty-printed JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/countdownEvents.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{STORAGE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<CountdownEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read events from {}", self.path.display()))?;
        let events = serde_json::from_str(&data).map_err(|err| map_deser_error(err, &self.path))?;
        Ok(events)
    }

    fn save_all(&self, events: &[CountdownEvent]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = serde_json::to_string_pretty(events)?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write events to {}", self.path.display()))?;
        log::debug!("Saved {} events to {}", events.len(), self.path.display());
        Ok(())
    }

    fn is_initialized(&self) -> Result<bool> {
        Ok(self.path.exists())
    }
}

fn map_deser_error(err: SerdeError, path: &Path) -> anyhow::Error {
    anyhow::Error::new(err).context(format!(
        "failed to deserialize events from {}",
        path.display()
    ))
}
