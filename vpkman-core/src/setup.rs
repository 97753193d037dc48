use anyhow::{Context, Result};
use std::fs;
use tracing::info;

use crate::gameinfo;
use crate::paths::GamePaths;

#[derive(Debug, Clone, Default)]
pub struct SetupReport {
    /// False when gameinfo.gi was already configured for mods.
    pub gameinfo_patched: bool,
}

/// One-time setup for a game install: make sure the addons directory exists
/// and register it in gameinfo.gi. Safe to re-run; a missing gameinfo.gi is
/// the only fatal condition.
pub fn run_initial_setup(
    paths: &GamePaths,
    mut progress_cb: impl FnMut(&str, u8),
) -> Result<SetupReport> {
    let mut progress = |m: &str, pct: u8| {
        info!("{}", m);
        progress_cb(m, pct);
    };

    progress("Checking game folder layout", 5);
    let addons = paths.addons_dir();
    fs::create_dir_all(&addons)
        .with_context(|| format!("creating addons folder {}", addons.display()))?;

    progress("Patching gameinfo.gi", 40);
    let applied = gameinfo::patch_file(&paths.gameinfo_path())?;
    progress(
        if applied { "gameinfo.gi updated" } else { "gameinfo.gi already configured" },
        90,
    );

    progress("Setup complete", 100);
    Ok(SetupReport { gameinfo_patched: applied })
}
