//! Test fixture loader for golden matrices and EM scenarios.
//!
//! Fixtures live under `test-fixtures/golden/` at the workspace root and are
//! shared by the tests of every crate.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the golden fixture files.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures/golden.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("golden").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures/golden from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures").join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures/golden directory not found");
    }

    #[test]
    fn all_golden_files_exist() {
        let files = [
            "matrix/four_by_three.json",
            "matrix/invalid_sparse.json",
            "em/single_component.json",
            "em/planted_three.json",
        ];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn every_fixture_parses_as_json() {
        for subdir in ["matrix", "em"] {
            let files = list_fixtures(subdir);
            assert!(!files.is_empty(), "no fixtures in {subdir}");
            for path in files {
                let content = std::fs::read_to_string(&path).unwrap();
                let value: serde_json::Value = serde_json::from_str(&content)
                    .unwrap_or_else(|e| panic!("{}: {}", path.display(), e));
                assert!(value.get("name").is_some(), "{} has no name", path.display());
            }
        }
    }
}
