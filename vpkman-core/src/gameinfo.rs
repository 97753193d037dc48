use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Substring that marks a gameinfo.gi as already configured for mods.
/// A coarse probe, not a structural check; hand-edited files still match.
pub const MOD_SEARCH_PATH: &str = "citadel/addons";

// The engine resolves content in SearchPaths order, so citadel/addons must
// come first. Tabs are literal; the block lands two levels deep, right after
// FileSystem's opening brace.
const SEARCH_PATHS_BLOCK: [&str; 10] = [
    "\t\tSearchPaths",
    "\t\t{",
    "\t\t\tGame\t\t\t\tcitadel/addons",
    "\t\t\tMod\t\t\t\tcitadel",
    "\t\t\tWrite\t\t\t\tcitadel",
    "\t\t\tGame\t\t\t\tcitadel",
    "\t\t\tWrite\t\t\t\tcore",
    "\t\t\tMod\t\t\t\tcore",
    "\t\t\tGame\t\t\t\tcore",
    "\t\t}",
];

// Sits at FileSystem's own nesting level, directly below its closing brace.
const ADDON_CONFIG_BLOCK: [&str; 4] = [
    "\tAddonConfig",
    "\t{",
    "\t\t\"UseOfficialAddons\"\t\"1\"",
    "\t}",
];

#[derive(Debug, Error)]
pub enum GameInfoError {
    #[error("gameinfo.gi not found at {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to read or write gameinfo.gi")]
    Io(#[from] std::io::Error),
}

/// Result of running the patcher over an in-memory document.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub lines: Vec<String>,
    pub applied: bool,
}

fn find_header(lines: &[String], name: &str) -> Option<usize> {
    lines.iter().position(|l| l.trim().eq_ignore_ascii_case(name))
}

/// Index of the line closing the block that starts at `header`, scanning with
/// a brace counter. A counter that never returns to zero after opening means
/// the block is malformed; report nothing and let the caller skip its step.
fn find_block_end(lines: &[String], header: usize) -> Option<usize> {
    let mut depth = 0i32;
    let mut opened = false;
    for (i, line) in lines.iter().enumerate().skip(header) {
        if line.contains('{') {
            depth += 1;
            opened = true;
        }
        if line.contains('}') {
            depth -= 1;
            if opened && depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Patch a gameinfo.gi document so the engine picks up `citadel/addons`.
///
/// Removes any existing SearchPaths block, inserts the canonical one right
/// after FileSystem's opening brace, and appends an AddonConfig block after
/// FileSystem's closing brace when none exists yet. Missing or malformed
/// blocks skip their step without failing; the document stays line-accurate
/// outside the edited ranges.
pub fn patch_lines(mut lines: Vec<String>) -> PatchOutcome {
    if lines.iter().any(|l| l.trim().contains(MOD_SEARCH_PATH)) {
        return PatchOutcome { lines, applied: false };
    }

    if let Some(start) = find_header(&lines, "SearchPaths") {
        if let Some(end) = find_block_end(&lines, start) {
            lines.drain(start..=end);
        }
    }

    // Both indices are captured before any insertion; the closing index must
    // be shifted by whatever Step 3 adds above it.
    let fs_header = find_header(&lines, "FileSystem");
    let fs_open = fs_header
        .and_then(|h| lines[h..].iter().position(|l| l.contains('{')).map(|i| h + i));
    let fs_close = fs_header.and_then(|h| find_block_end(&lines, h));

    let mut inserted = 0usize;
    if let Some(open) = fs_open {
        for (i, block_line) in SEARCH_PATHS_BLOCK.iter().enumerate() {
            lines.insert(open + 1 + i, (*block_line).to_string());
        }
        inserted = SEARCH_PATHS_BLOCK.len();
    }

    if find_header(&lines, "AddonConfig").is_none() {
        if let Some(close) = fs_close {
            let at = close + inserted + 1;
            for (i, block_line) in ADDON_CONFIG_BLOCK.iter().enumerate() {
                lines.insert(at + i, (*block_line).to_string());
            }
        }
    }

    PatchOutcome { lines, applied: true }
}

/// File-level wrapper around [`patch_lines`]. A missing file is the only
/// fatal condition; the file is rewritten only when the patch applied.
pub fn patch_file(path: &Path) -> Result<bool, GameInfoError> {
    if !path.is_file() {
        return Err(GameInfoError::Missing(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    let lines: Vec<String> = text.lines().map(str::to_owned).collect();
    let outcome = patch_lines(lines);
    if outcome.applied {
        let mut out = outcome.lines.join("\n");
        if text.ends_with('\n') {
            out.push('\n');
        }
        fs::write(path, out)?;
        info!("Patched {}", path.display());
    }
    Ok(outcome.applied)
}

/// Quick probe for the UI status label.
pub fn is_patched(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|text| text.lines().any(|l| l.trim().contains(MOD_SEARCH_PATH)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn patches_minimal_filesystem_block() {
        let input = doc(&["FileSystem", "{", "\tSteamAppId\t1422450", "}"]);
        let out = patch_lines(input);
        assert!(out.applied);
        let expected = doc(&[
            "FileSystem",
            "{",
            "\t\tSearchPaths",
            "\t\t{",
            "\t\t\tGame\t\t\t\tcitadel/addons",
            "\t\t\tMod\t\t\t\tcitadel",
            "\t\t\tWrite\t\t\t\tcitadel",
            "\t\t\tGame\t\t\t\tcitadel",
            "\t\t\tWrite\t\t\t\tcore",
            "\t\t\tMod\t\t\t\tcore",
            "\t\t\tGame\t\t\t\tcore",
            "\t\t}",
            "\tSteamAppId\t1422450",
            "}",
            "\tAddonConfig",
            "\t{",
            "\t\t\"UseOfficialAddons\"\t\"1\"",
            "\t}",
        ]);
        assert_eq!(out.lines, expected);
    }

    #[test]
    fn skips_documents_that_already_reference_addons() {
        let input = doc(&[
            "FileSystem",
            "{",
            "\tGame\tcitadel/addons",
            "}",
        ]);
        let out = patch_lines(input.clone());
        assert!(!out.applied);
        assert_eq!(out.lines, input);
    }

    #[test]
    fn second_patch_is_a_noop() {
        let first = patch_lines(doc(&["FileSystem", "{", "\tSteamAppId\t1422450", "}"]));
        assert!(first.applied);
        let second = patch_lines(first.lines.clone());
        assert!(!second.applied);
        assert_eq!(second.lines, first.lines);
    }

    #[test]
    fn replaces_existing_search_paths_block() {
        let input = doc(&[
            "GameInfo",
            "{",
            "\tFileSystem",
            "\t{",
            "\t\tSearchPaths",
            "\t\t{",
            "\t\t\tGame\t\t\tcore",
            "\t\t}",
            "\t\tSteamAppId\t1422450",
            "\t}",
            "}",
        ]);
        let out = patch_lines(input);
        assert!(out.applied);
        // Old block is gone entirely.
        assert!(!out.lines.iter().any(|l| l == "\t\t\tGame\t\t\tcore"));
        // Canonical block is the first content inside FileSystem's braces.
        assert_eq!(out.lines[4], "\t\tSearchPaths");
        assert_eq!(out.lines[5], "\t\t{");
        assert_eq!(out.lines[6], "\t\t\tGame\t\t\t\tcitadel/addons");
        assert_eq!(out.lines[13], "\t\t}");
        assert_eq!(out.lines[14], "\t\tSteamAppId\t1422450");
        assert_eq!(out.lines[15], "\t}");
        // AddonConfig lands directly after FileSystem's closing brace, before
        // the outer GameInfo brace.
        assert_eq!(out.lines[16], "\tAddonConfig");
        assert_eq!(out.lines[19], "\t}");
        assert_eq!(out.lines[20], "}");
        assert_eq!(out.lines.len(), 21);
    }

    #[test]
    fn search_path_entries_keep_resolution_order() {
        let out = patch_lines(doc(&["FileSystem", "{", "}"]));
        let keys: Vec<&str> = out
            .lines
            .iter()
            .filter_map(|l| {
                let t = l.trim();
                (t.starts_with("Game") || t.starts_with("Mod") || t.starts_with("Write"))
                    .then(|| t)
            })
            .collect();
        assert_eq!(
            keys,
            vec![
                "Game\t\t\t\tcitadel/addons",
                "Mod\t\t\t\tcitadel",
                "Write\t\t\t\tcitadel",
                "Game\t\t\t\tcitadel",
                "Write\t\t\t\tcore",
                "Mod\t\t\t\tcore",
                "Game\t\t\t\tcore",
            ]
        );
    }

    #[test]
    fn no_filesystem_header_means_no_insertions() {
        let input = doc(&["GameInfo", "{", "\tgame\tCitadel", "}"]);
        let out = patch_lines(input.clone());
        assert!(out.applied);
        assert_eq!(out.lines, input);
    }

    #[test]
    fn removes_search_paths_even_without_filesystem() {
        let input = doc(&[
            "SearchPaths",
            "{",
            "\tGame\tcore",
            "}",
            "SteamAppId\t1422450",
        ]);
        let out = patch_lines(input);
        assert!(out.applied);
        assert_eq!(out.lines, doc(&["SteamAppId\t1422450"]));
    }

    #[test]
    fn unclosed_search_paths_block_is_left_in_place() {
        let input = doc(&["SearchPaths", "{", "\tGame\tcore"]);
        let out = patch_lines(input.clone());
        assert!(out.applied);
        assert_eq!(out.lines, input);
    }

    #[test]
    fn existing_addon_config_is_not_duplicated() {
        let input = doc(&[
            "FileSystem",
            "{",
            "\tSteamAppId\t1422450",
            "}",
            "AddonConfig",
            "{",
            "\t\"SomeKey\"\t\"0\"",
            "}",
        ]);
        let out = patch_lines(input);
        assert!(out.applied);
        let headers = out
            .lines
            .iter()
            .filter(|l| l.trim().eq_ignore_ascii_case("AddonConfig"))
            .count();
        assert_eq!(headers, 1);
        // SearchPaths still went in.
        assert_eq!(out.lines[2], "\t\tSearchPaths");
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let input = doc(&["filesystem", "{", "}"]);
        let out = patch_lines(input);
        assert!(out.applied);
        assert_eq!(out.lines[1], "{");
        assert_eq!(out.lines[2], "\t\tSearchPaths");
    }

    #[test]
    fn patch_file_reports_missing_config() {
        let path = std::env::temp_dir()
            .join(format!("vpkman-gi-missing-{}", std::process::id()))
            .join("gameinfo.gi");
        let err = patch_file(&path).unwrap_err();
        assert!(matches!(err, GameInfoError::Missing(_)));
    }

    #[test]
    fn patch_file_round_trips_on_disk() {
        let dir = std::env::temp_dir().join(format!("vpkman-gi-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("gameinfo.gi");
        fs::write(&path, "FileSystem\n{\n\tSteamAppId\t1422450\n}\n").unwrap();

        assert!(!is_patched(&path));
        assert!(patch_file(&path).unwrap());
        assert!(is_patched(&path));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\t\t\tGame\t\t\t\tcitadel/addons"));
        assert!(text.ends_with('\n'));

        // Second run must leave the file byte-identical.
        assert!(!patch_file(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), text);

        let _ = fs::remove_dir_all(&dir);
    }
}
