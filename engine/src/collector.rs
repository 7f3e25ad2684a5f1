//! File collection: expands a glob pattern against a working directory and
//! snapshots the matching regular files.

use glob::glob;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::model::FileEntry;

/// Collect the regular files under `root` matching `pattern`.
///
/// When `recursive` is set the pattern is also expanded against every
/// subdirectory (`root/**/pattern`). Directories are filtered out; entries
/// are returned in the walker's enumeration order, which is
/// platform-dependent and not guaranteed sorted.
///
/// Entries that disappear or become unreadable between matching and stat-ing
/// are skipped with a warning rather than failing the scan.
///
/// # Errors
/// - `EngineError::DirectoryNotFound` when `root` is missing or not a directory
/// - `EngineError::InvalidGlob` when `pattern` fails to compile
pub fn collect(root: &Path, pattern: &str, recursive: bool) -> Result<Vec<FileEntry>, EngineError> {
    if !root.is_dir() {
        return Err(EngineError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let full_pattern = if recursive {
        root.join("**").join(pattern)
    } else {
        root.join(pattern)
    };
    let full_pattern = full_pattern.to_string_lossy().into_owned();
    debug!(pattern = %full_pattern, "expanding glob");

    let paths = glob(&full_pattern).map_err(|e| EngineError::InvalidGlob {
        pattern: pattern.to_string(),
        source: e,
    })?;

    let mut entries = Vec::new();
    for item in paths {
        let path = match item {
            Ok(path) => path,
            Err(e) => {
                warn!("skipping unreadable match: {}", e);
                continue;
            }
        };

        if !path.is_file() {
            continue;
        }

        match FileEntry::from_path(&path) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!("skipping {}: {}", path.display(), e),
        }
    }

    info!("found {} files with pattern '{}'", entries.len(), pattern);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_matches_pattern() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("a.txt"), "aa").expect("Failed to write a.txt");
        fs::write(temp_dir.path().join("b.txt"), "bb").expect("Failed to write b.txt");
        fs::write(temp_dir.path().join("c.jpg"), "cc").expect("Failed to write c.jpg");

        let entries = collect(temp_dir.path(), "*.txt", false).expect("Failed to collect");
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.file_name.ends_with(".txt")));
        assert!(entries.iter().all(|e| e.size == 2));
    }

    #[test]
    fn test_collect_skips_directories() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::create_dir(temp_dir.path().join("sub.txt")).expect("Failed to create dir");
        fs::write(temp_dir.path().join("real.txt"), "x").expect("Failed to write file");

        let entries = collect(temp_dir.path(), "*.txt", false).expect("Failed to collect");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name, "real.txt");
    }

    #[test]
    fn test_collect_recursive_descends_into_subdirectories() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let sub = temp_dir.path().join("nested");
        fs::create_dir(&sub).expect("Failed to create subdir");
        fs::write(temp_dir.path().join("top.txt"), "t").expect("Failed to write top.txt");
        fs::write(sub.join("deep.txt"), "d").expect("Failed to write deep.txt");

        let flat = collect(temp_dir.path(), "*.txt", false).expect("Failed to collect flat");
        assert_eq!(flat.len(), 1);

        let recursive = collect(temp_dir.path(), "*.txt", true).expect("Failed to collect rec");
        assert_eq!(recursive.len(), 2);
    }

    #[test]
    fn test_collect_missing_directory() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("nope");

        let result = collect(&missing, "*", false);
        assert!(matches!(
            result,
            Err(EngineError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_collect_rejects_invalid_glob() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let result = collect(temp_dir.path(), "[", false);
        assert!(matches!(result, Err(EngineError::InvalidGlob { .. })));
    }
}
