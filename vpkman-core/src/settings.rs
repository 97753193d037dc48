use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub game_install_path: Option<String>,
    pub setup_completed: Option<bool>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            game_install_path: None,
            setup_completed: None,
        }
    }
}

#[derive(Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "vpkman")
            .ok_or_else(|| anyhow::anyhow!("failed to resolve config directory"))?;
        let config_dir = dirs.config_dir().to_path_buf();
        fs::create_dir_all(&config_dir)?;
        Ok(Self { path: config_dir.join("settings.toml") })
    }

    /// Store backed by an explicit file path; used by tests.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<AppSettings> {
        if !self.path.exists() {
            return Ok(AppSettings::default());
        }
        let text = fs::read_to_string(&self.path)?;
        let settings: AppSettings = toml::from_str(&text)?;
        Ok(settings)
    }

    pub fn save(&self, settings: &AppSettings) -> Result<()> {
        let text = toml::to_string_pretty(settings)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}
