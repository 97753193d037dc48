use std::fs;
use std::path::PathBuf;

/// Extract quoted fields from one VDF line: `"1" "D:\\Lib"` -> ["1", "D:\\Lib"].
fn quoted_fields(line: &str) -> Vec<&str> {
    line.split('"')
        .enumerate()
        .filter_map(|(i, s)| (i % 2 == 1).then_some(s))
        .collect()
}

#[cfg(windows)]
fn normalize_vdf_path(raw: &str) -> String {
    raw.replace("\\\\", "\\").replace('/', "\\")
}

#[cfg(unix)]
fn normalize_vdf_path(raw: &str) -> String {
    raw.to_string()
}

/// Pull library roots out of a `libraryfolders.vdf`. Handles both the old
/// flat layout (`"1" "D:\\SteamLibrary"`) and the newer nested blocks with a
/// `"path"` key; everything else on the line is ignored.
fn parse_libraryfolders_vdf_paths(text: &str) -> Vec<PathBuf> {
    let mut results: Vec<PathBuf> = Vec::new();
    for line in text.lines() {
        let fields = quoted_fields(line.trim());
        if fields.len() < 2 {
            continue;
        }
        let key = fields[0];
        let is_library_entry =
            key == "path" || (!key.is_empty() && key.chars().all(|c| c.is_ascii_digit()));
        if !is_library_entry {
            continue;
        }
        let path = PathBuf::from(normalize_vdf_path(fields[1]));
        if !results.contains(&path) {
            results.push(path);
        }
    }
    results
}

#[cfg(windows)]
fn steam_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(pf86) = std::env::var("ProgramFiles(x86)") {
        roots.push(PathBuf::from(pf86).join("Steam"));
    }
    roots.push(PathBuf::from("C:/Program Files (x86)/Steam"));
    roots
}

#[cfg(unix)]
fn steam_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(home) = std::env::var("HOME") {
        let home = PathBuf::from(home);
        roots.push(home.join(".local/share/Steam"));
        roots.push(home.join(".steam/steam"));
        roots.push(home.join(".var/app/com.valvesoftware.Steam/.local/share/Steam"));
    }
    roots
}

/// Find `steamapps/common/<install_folder>` in the default Steam root or any
/// library listed in libraryfolders.vdf.
pub fn detect_install_folder_path(install_folder: &str) -> Option<PathBuf> {
    for root in steam_roots() {
        let candidate = root.join("steamapps").join("common").join(install_folder);
        if candidate.exists() {
            return Some(candidate);
        }
        let vdf = root.join("steamapps").join("libraryfolders.vdf");
        if let Ok(text) = fs::read_to_string(&vdf) {
            for lib_root in parse_libraryfolders_vdf_paths(&text) {
                let candidate = lib_root.join("steamapps").join("common").join(install_folder);
                if candidate.exists() {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

pub fn detect_deadlock_install() -> Option<PathBuf> {
    detect_install_folder_path("Deadlock")
}

#[cfg(test)]
mod tests {
    use super::parse_libraryfolders_vdf_paths;
    use std::path::PathBuf;

    #[cfg(windows)]
    #[test]
    fn parses_old_and_new_vdf_layouts() {
        let vdf = r#"
        "libraryfolders"
        {
            "contentstatsid" "-123456789"
            "1" "D:\\SteamLibrary"
            "2"
            {
                "path" "E:\\Games\\SteamLibrary"
                "label" ""
                "contentid" "123456789"
            }
        }
        "#;
        let libs = parse_libraryfolders_vdf_paths(vdf);
        assert!(libs.contains(&PathBuf::from("D:\\SteamLibrary")));
        assert!(libs.contains(&PathBuf::from("E:\\Games\\SteamLibrary")));
    }

    #[cfg(unix)]
    #[test]
    fn parses_old_and_new_vdf_layouts() {
        let vdf = r#"
        "libraryfolders"
        {
            "contentstatsid" "-123456789"
            "1" "/mnt/ssd/SteamLibrary"
            "2"
            {
                "path" "/home/user/.local/share/Steam"
                "label" ""
                "contentid" "123456789"
            }
        }
        "#;
        let libs = parse_libraryfolders_vdf_paths(vdf);
        assert!(libs.contains(&PathBuf::from("/mnt/ssd/SteamLibrary")));
        assert!(libs.contains(&PathBuf::from("/home/user/.local/share/Steam")));
    }

    #[test]
    fn ignores_non_library_keys_and_duplicates() {
        let vdf = "\"label\" \"something\"\n\"1\" \"SteamLibrary\"\n\"1\" \"SteamLibrary\"\n";
        let libs = parse_libraryfolders_vdf_paths(vdf);
        assert_eq!(libs, vec![PathBuf::from("SteamLibrary")]);
    }
}
