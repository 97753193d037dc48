pub mod gameinfo;
pub mod jobs;
pub mod logging;
pub mod mods;
pub mod paths;
pub mod settings;
pub mod setup;
pub mod steam;

pub use gameinfo::{is_patched, patch_file, patch_lines, GameInfoError, PatchOutcome};
pub use jobs::JobProgress;
pub use logging::init_logging;
pub use mods::{ModEntry, ModLibrary, MOD_EXTENSION};
pub use paths::GamePaths;
pub use settings::{AppSettings, SettingsStore};
pub use setup::{run_initial_setup, SetupReport};
pub use steam::{detect_deadlock_install, detect_install_folder_path};
