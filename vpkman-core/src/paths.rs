use std::path::{Path, PathBuf};

/// Resolved locations inside one game install. Built once from the install
/// directory and passed into each operation; nothing here is global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePaths {
    install_dir: PathBuf,
}

impl GamePaths {
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self { install_dir: install_dir.into() }
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    pub fn game_dir(&self) -> PathBuf {
        self.install_dir.join("game")
    }

    pub fn citadel_dir(&self) -> PathBuf {
        self.game_dir().join("citadel")
    }

    /// Where mod packages live, sibling to gameinfo.gi.
    pub fn addons_dir(&self) -> PathBuf {
        self.citadel_dir().join("addons")
    }

    pub fn gameinfo_path(&self) -> PathBuf {
        self.citadel_dir().join("gameinfo.gi")
    }

    pub fn looks_valid(&self) -> bool {
        self.citadel_dir().is_dir()
    }
}
