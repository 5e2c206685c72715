// Storage service module
// Persists the whole event list under a single key

mod json;
mod sqlite;

pub use json::JsonFileStore;
pub use sqlite::SqliteStore;

use std::path::Path;

use anyhow::Result;

use crate::models::countdown_event::CountdownEvent;
use crate::models::settings::StorageBackend;

/// Key the serialized event list is stored under.
pub const STORAGE_KEY: &str = "countdownEvents";

/// Load/save collaborator for the event list.
#[cfg_attr(test, mockall::automock)]
pub trait EventStore {
    /// All saved events; empty when nothing was ever saved.
    fn load_all(&self) -> Result<Vec<CountdownEvent>>;

    /// Replace the stored list.
    fn save_all(&self, events: &[CountdownEvent]) -> Result<()>;

    /// Whether anything has been saved under [`STORAGE_KEY`] yet.
    fn is_initialized(&self) -> Result<bool>;
}

impl<S: EventStore + ?Sized> EventStore for Box<S> {
    fn load_all(&self) -> Result<Vec<CountdownEvent>> {
        (**self).load_all()
    }

    fn save_all(&self, events: &[CountdownEvent]) -> Result<()> {
        (**self).save_all(events)
    }

    fn is_initialized(&self) -> Result<bool> {
        (**self).is_initialized()
    }
}

/// Open the configured backend inside `data_dir`.
pub fn open_store(backend: StorageBackend, data_dir: &Path) -> Result<Box<dyn EventStore>> {
    log::debug!("Opening {:?} event store in {}", backend, data_dir.display());
    let store: Box<dyn EventStore> = match backend {
        StorageBackend::Json => Box::new(JsonFileStore::in_dir(data_dir)),
        StorageBackend::Sqlite => Box::new(SqliteStore::open_in_dir(data_dir)?),
    };
    Ok(store)
}
