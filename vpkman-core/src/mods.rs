use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const MOD_EXTENSION: &str = "vpk";

const ENABLED_SUFFIX: &str = ".vpk";
const DISABLED_SUFFIX: &str = ".vpk.disabled";

/// A mod package found in the addons directory. Packages are opaque files;
/// the only state we track is which suffix form they currently carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModEntry {
    /// File name without the `.vpk`/`.vpk.disabled` suffix.
    pub name: String,
    /// On-disk file name.
    pub file_name: String,
    pub enabled: bool,
    pub size: u64,
}

/// Lists, toggles, installs and removes VPK packages inside one addons
/// directory. All operations are plain renames/copies/deletes.
pub struct ModLibrary {
    addons_dir: PathBuf,
}

impl ModLibrary {
    pub fn new(addons_dir: impl Into<PathBuf>) -> Self {
        Self { addons_dir: addons_dir.into() }
    }

    pub fn addons_dir(&self) -> &Path {
        &self.addons_dir
    }

    pub fn list(&self) -> Result<Vec<ModEntry>> {
        let mut entries = Vec::new();
        let dir = fs::read_dir(&self.addons_dir)
            .with_context(|| format!("reading addons folder {}", self.addons_dir.display()))?;
        for entry in dir {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().to_string();
            let lower = file_name.to_ascii_lowercase();
            let (enabled, stem_len) = if lower.ends_with(DISABLED_SUFFIX) {
                (false, file_name.len() - DISABLED_SUFFIX.len())
            } else if lower.ends_with(ENABLED_SUFFIX) {
                (true, file_name.len() - ENABLED_SUFFIX.len())
            } else {
                continue;
            };
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            entries.push(ModEntry {
                name: file_name[..stem_len].to_string(),
                file_name,
                enabled,
                size,
            });
        }
        entries.sort_by(|a, b| a.name.to_ascii_lowercase().cmp(&b.name.to_ascii_lowercase()));
        Ok(entries)
    }

    pub fn enable(&self, name: &str) -> Result<()> {
        let from = self.addons_dir.join(format!("{name}{DISABLED_SUFFIX}"));
        let to = self.addons_dir.join(format!("{name}{ENABLED_SUFFIX}"));
        if to.exists() && !from.exists() {
            return Ok(());
        }
        fs::rename(&from, &to).with_context(|| format!("enabling mod {name}"))?;
        info!("Enabled mod {}", name);
        Ok(())
    }

    pub fn disable(&self, name: &str) -> Result<()> {
        let from = self.addons_dir.join(format!("{name}{ENABLED_SUFFIX}"));
        let to = self.addons_dir.join(format!("{name}{DISABLED_SUFFIX}"));
        if to.exists() && !from.exists() {
            return Ok(());
        }
        fs::rename(&from, &to).with_context(|| format!("disabling mod {name}"))?;
        info!("Disabled mod {}", name);
        Ok(())
    }

    /// Copy a package into the addons directory. The source keeps its file
    /// name and arrives enabled; anything that is not a `.vpk` is rejected.
    pub fn install(&self, source: &Path) -> Result<ModEntry> {
        let is_vpk = source
            .extension()
            .map(|e| e.eq_ignore_ascii_case(MOD_EXTENSION))
            .unwrap_or(false);
        if !is_vpk {
            bail!("{} is not a .vpk package", source.display());
        }
        let file_name = source
            .file_name()
            .context("source path has no file name")?
            .to_string_lossy()
            .to_string();
        fs::create_dir_all(&self.addons_dir)?;
        let dest = self.addons_dir.join(&file_name);
        fs::copy(source, &dest)
            .with_context(|| format!("copying {} into {}", source.display(), self.addons_dir.display()))?;
        let size = fs::metadata(&dest).map(|m| m.len()).unwrap_or(0);
        info!("Installed mod {}", file_name);
        let name = file_name[..file_name.len() - ENABLED_SUFFIX.len()].to_string();
        Ok(ModEntry { name, file_name, enabled: true, size })
    }

    /// Delete a package in whichever suffix form it currently has.
    pub fn uninstall(&self, name: &str) -> Result<()> {
        let mut removed = false;
        for suffix in [ENABLED_SUFFIX, DISABLED_SUFFIX] {
            let path = self.addons_dir.join(format!("{name}{suffix}"));
            if path.exists() {
                fs::remove_file(&path)
                    .with_context(|| format!("deleting {}", path.display()))?;
                removed = true;
            }
        }
        if !removed {
            bail!("mod {} not found in {}", name, self.addons_dir.display());
        }
        info!("Uninstalled mod {}", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_library(tag: &str) -> ModLibrary {
        let dir = std::env::temp_dir().join(format!("vpkman-mods-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        ModLibrary::new(dir)
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"vpk").unwrap();
    }

    #[test]
    fn list_separates_enabled_and_disabled() {
        let lib = temp_library("list");
        touch(lib.addons_dir(), "b_skin.vpk");
        touch(lib.addons_dir(), "a_map.vpk.disabled");
        touch(lib.addons_dir(), "notes.txt");

        let entries = lib.list().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a_map");
        assert!(!entries[0].enabled);
        assert_eq!(entries[1].name, "b_skin");
        assert!(entries[1].enabled);
        assert_eq!(entries[1].file_name, "b_skin.vpk");

        let _ = fs::remove_dir_all(lib.addons_dir());
    }

    #[test]
    fn enable_and_disable_rename_in_place() {
        let lib = temp_library("toggle");
        touch(lib.addons_dir(), "pak01.vpk");

        lib.disable("pak01").unwrap();
        assert!(lib.addons_dir().join("pak01.vpk.disabled").exists());
        assert!(!lib.addons_dir().join("pak01.vpk").exists());

        lib.enable("pak01").unwrap();
        assert!(lib.addons_dir().join("pak01.vpk").exists());

        // Toggling an already-enabled mod is a no-op, not an error.
        lib.enable("pak01").unwrap();

        let _ = fs::remove_dir_all(lib.addons_dir());
    }

    #[test]
    fn install_copies_vpk_and_rejects_other_files() {
        let lib = temp_library("install");
        let staging = std::env::temp_dir()
            .join(format!("vpkman-staging-{}", std::process::id()));
        let _ = fs::remove_dir_all(&staging);
        fs::create_dir_all(&staging).unwrap();
        fs::write(staging.join("cool_mod.vpk"), b"payload").unwrap();
        fs::write(staging.join("readme.md"), b"nope").unwrap();

        let entry = lib.install(&staging.join("cool_mod.vpk")).unwrap();
        assert_eq!(entry.name, "cool_mod");
        assert!(entry.enabled);
        assert!(lib.addons_dir().join("cool_mod.vpk").exists());

        assert!(lib.install(&staging.join("readme.md")).is_err());

        let _ = fs::remove_dir_all(&staging);
        let _ = fs::remove_dir_all(lib.addons_dir());
    }

    #[test]
    fn uninstall_removes_either_suffix_form() {
        let lib = temp_library("uninstall");
        touch(lib.addons_dir(), "old.vpk.disabled");

        lib.uninstall("old").unwrap();
        assert!(lib.list().unwrap().is_empty());
        assert!(lib.uninstall("old").is_err());

        let _ = fs::remove_dir_all(lib.addons_dir());
    }
}
