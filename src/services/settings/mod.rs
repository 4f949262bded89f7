// Settings service
// Loads and saves layout settings as TOML

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::LayoutSettings;

const SETTINGS_FILE: &str = "layout.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service backed by the platform config directory
    pub fn with_default_path() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("com", "CalendarLayout", "CalendarLayout") {
            dirs.config_dir().join(SETTINGS_FILE)
        } else {
            log::warn!("Unable to resolve project directory; using current dir for settings");
            PathBuf::from(SETTINGS_FILE)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current settings; a missing file yields the defaults
    pub fn get(&self) -> Result<LayoutSettings> {
        load_settings(&self.path)
    }

    pub fn update(&self, settings: &LayoutSettings) -> Result<()> {
        save_settings(&self.path, settings)
    }
}

pub fn load_settings(path: &Path) -> Result<LayoutSettings> {
    if !path.exists() {
        log::debug!("No settings at {}, using defaults", path.display());
        return Ok(LayoutSettings::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings from {}", path.display()))?;
    let settings: LayoutSettings = toml::from_str(&data)
        .with_context(|| format!("failed to parse settings from {}", path.display()))?;

    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings in {}: {}", path.display(), e))?;

    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &LayoutSettings) -> Result<()> {
    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings: {}", e))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }
    }

    let data = toml::to_string_pretty(settings).context("failed to serialize settings")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write settings to {}", path.display()))?;
    Ok(())
}
