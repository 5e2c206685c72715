use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::AppSettings;

/// Environment variable that overrides the configured data directory.
pub const DATA_DIR_ENV: &str = "COUNTDOWN_DATA_DIR";

const CONFIG_FILE: &str = "config.toml";

/// Reads and writes `config.toml`.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service for the platform config file, or `./config.toml` when no
    /// home directory can be resolved.
    pub fn from_default_location() -> Self {
        let path = match project_dirs() {
            Some(dirs) => dirs.config_dir().join(CONFIG_FILE),
            None => {
                log::warn!("Unable to resolve project directory; using current dir for config");
                PathBuf::from(CONFIG_FILE)
            }
        };
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file yields the defaults.
    pub fn load(&self) -> Result<AppSettings> {
        if !self.path.exists() {
            log::debug!("No settings file at {}, using defaults", self.path.display());
            return Ok(AppSettings::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let settings: AppSettings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;
        Ok(settings)
    }

    pub fn save(&self, settings: &AppSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;
        Ok(())
    }
}

/// Directory holding the event store.
///
/// Precedence: explicit override, `COUNTDOWN_DATA_DIR`, `data_dir` from the
/// settings, the platform data directory, then the current directory.
pub fn resolve_data_dir(settings: &AppSettings, override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    if let Some(dir) = &settings.data_dir {
        return dir.clone();
    }
    match project_dirs() {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => {
            log::warn!("Unable to resolve project directory; using current dir for events");
            PathBuf::from(".")
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "RustCountdown", "Countdown")
}
