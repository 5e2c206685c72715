mod service;

pub use service::{resolve_data_dir, SettingsService, DATA_DIR_ENV};
