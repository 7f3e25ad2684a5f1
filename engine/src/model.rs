//! Core data model for rename runs.
//!
//! This module defines the main data structures for representing a batch
//! rename:
//! - FileEntry: an immutable snapshot of one file taken at scan time
//! - RenamePlan: the ordered pairing of files with proposed names
//! - OperationRecord / ExecutionReport: per-file and per-run outcomes

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use uuid::Uuid;

use crate::error::EngineError;

/// Snapshot of a regular file taken by the collector.
///
/// Entries are never mutated after a scan; if the filesystem changes
/// underneath them they simply go stale until the next scan.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Full path to the file
    pub path: PathBuf,

    /// Base name including extension
    pub file_name: String,

    /// File size in bytes at scan time
    pub size: u64,

    /// Last-modified timestamp, when the platform reports one
    pub modified: Option<SystemTime>,
}

impl FileEntry {
    /// Build an entry from a path by reading its metadata.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(FileEntry {
            path: path.to_path_buf(),
            file_name,
            size: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }

    /// File name without its extension ("archive.tar" for "archive.tar.gz").
    pub fn stem(&self) -> &str {
        match self.file_name.rfind('.') {
            Some(idx) if idx > 0 => &self.file_name[..idx],
            _ => &self.file_name,
        }
    }

    /// Extension including the leading dot, or "" when there is none.
    /// Dotfiles like ".gitignore" have no extension.
    pub fn extension(&self) -> &str {
        match self.file_name.rfind('.') {
            Some(idx) if idx > 0 => &self.file_name[idx..],
            _ => "",
        }
    }

    /// Directory containing this file.
    pub fn parent(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// An ordered pairing of scanned files with proposed new names.
///
/// Plans are produced fresh per preview and superseded by the next one.
/// Proposed names are not checked for uniqueness here; collisions are
/// detected by the executor at execution time.
#[derive(Debug, Clone)]
pub struct RenamePlan {
    /// Unique identifier for this plan
    pub id: Uuid,

    /// Files in scan order
    pub files: Vec<FileEntry>,

    /// Proposed names, positionally aligned with `files`
    pub proposed: Vec<String>,
}

impl RenamePlan {
    /// Pair files with proposed names.
    ///
    /// # Errors
    /// Returns `EngineError::PlanMismatch` when the lists differ in length.
    pub fn new(files: Vec<FileEntry>, proposed: Vec<String>) -> Result<Self, EngineError> {
        if files.len() != proposed.len() {
            return Err(EngineError::PlanMismatch {
                files: files.len(),
                names: proposed.len(),
            });
        }

        Ok(RenamePlan {
            id: Uuid::new_v4(),
            files,
            proposed,
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over (file, proposed name) pairs in plan order.
    pub fn pairs(&self) -> impl Iterator<Item = (&FileEntry, &str)> {
        self.files
            .iter()
            .zip(self.proposed.iter().map(|s| s.as_str()))
    }
}

/// Outcome of one attempted rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRecord {
    /// Original path
    pub original: PathBuf,

    /// Target path (parent directory joined with the proposed name)
    pub new: PathBuf,

    /// When the attempt was made
    pub timestamp: DateTime<Local>,

    /// Whether the rename (or dry-run simulation) succeeded
    pub success: bool,

    /// Error message for failed attempts
    pub error: Option<String>,
}

impl OperationRecord {
    pub fn succeeded(original: PathBuf, new: PathBuf) -> Self {
        OperationRecord {
            original,
            new,
            timestamp: Local::now(),
            success: true,
            error: None,
        }
    }

    pub fn failed(original: PathBuf, new: PathBuf, error: String) -> Self {
        OperationRecord {
            original,
            new,
            timestamp: Local::now(),
            success: false,
            error: Some(error),
        }
    }
}

/// Result of executing one rename plan.
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    /// One record per plan pair, in plan order
    pub records: Vec<OperationRecord>,

    /// True iff every record succeeded
    pub overall_success: bool,
}

impl ExecutionReport {
    pub fn success_count(&self) -> usize {
        self.records.iter().filter(|r| r.success).count()
    }

    pub fn failure_count(&self) -> usize {
        self.records.iter().filter(|r| !r.success).count()
    }
}

/// Options controlling plan execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecuteOptions {
    /// Record outcomes without touching the filesystem
    pub dry_run: bool,

    /// Copy each original into a `backup` subdirectory before renaming
    pub backup: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> FileEntry {
        FileEntry {
            path: PathBuf::from("/tmp").join(name),
            file_name: name.to_string(),
            size: 0,
            modified: None,
        }
    }

    #[test]
    fn test_stem_and_extension() {
        let e = entry("photo.jpg");
        assert_eq!(e.stem(), "photo");
        assert_eq!(e.extension(), ".jpg");

        let tarball = entry("archive.tar.gz");
        assert_eq!(tarball.stem(), "archive.tar");
        assert_eq!(tarball.extension(), ".gz");

        let bare = entry("README");
        assert_eq!(bare.stem(), "README");
        assert_eq!(bare.extension(), "");

        let dotfile = entry(".gitignore");
        assert_eq!(dotfile.stem(), ".gitignore");
        assert_eq!(dotfile.extension(), "");
    }

    #[test]
    fn test_plan_rejects_mismatched_lengths() {
        let result = RenamePlan::new(vec![entry("a.txt")], vec![]);
        assert!(matches!(
            result,
            Err(EngineError::PlanMismatch { files: 1, names: 0 })
        ));
    }

    #[test]
    fn test_plan_pairs_preserve_order() {
        let plan = RenamePlan::new(
            vec![entry("a.txt"), entry("b.txt")],
            vec!["x.txt".to_string(), "y.txt".to_string()],
        )
        .expect("Failed to build plan");

        let pairs: Vec<_> = plan.pairs().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0.file_name, "a.txt");
        assert_eq!(pairs[0].1, "x.txt");
        assert_eq!(pairs[1].1, "y.txt");
    }

    #[test]
    fn test_report_counts() {
        let report = ExecutionReport {
            records: vec![
                OperationRecord::succeeded(PathBuf::from("a"), PathBuf::from("b")),
                OperationRecord::failed(PathBuf::from("c"), PathBuf::from("d"), "boom".into()),
            ],
            overall_success: false,
        };
        assert_eq!(report.success_count(), 1);
        assert_eq!(report.failure_count(), 1);
    }
}
