//! Rename execution: collision checking, optional backup copies, and the
//! actual (or simulated) filesystem renames.
//!
//! Individual file failures never stop the batch; each pair produces exactly
//! one `OperationRecord` and the report says whether the whole run was clean.

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::model::{ExecuteOptions, ExecutionReport, OperationRecord, RenamePlan};
use crate::progress::ProgressCallback;

/// Execute a rename plan pair by pair, in plan order.
///
/// For each (original, proposed) pair:
/// 1. The target path is the original's parent joined with the proposed name.
/// 2. An existing target that differs from the original is a collision; the
///    pair is recorded as failed and the filesystem is left untouched.
/// 3. With `backup` set (and not dry-run), the original is copied into a
///    `backup` subdirectory first; a failed copy aborts that pair's rename.
/// 4. Dry-run records a successful outcome without touching the filesystem.
/// 5. Otherwise the file is renamed; errors are recorded per pair, and
///    already-renamed files are not rolled back.
pub fn execute(
    plan: &RenamePlan,
    options: ExecuteOptions,
    progress: Option<&dyn ProgressCallback>,
) -> ExecutionReport {
    if let Some(callback) = progress {
        callback.on_run_started(plan);
    }

    let mut records = Vec::with_capacity(plan.len());

    for (index, (file, proposed)) in plan.pairs().enumerate() {
        if let Some(callback) = progress {
            callback.on_file_started(index, file, proposed);
        }

        let target = file.parent().join(proposed);
        let record = rename_one(file.path.as_path(), &target, options);

        match &record.error {
            None => debug!("{} -> {}", file.file_name, proposed),
            Some(reason) => warn!("{}: {}", file.file_name, reason),
        }

        if let Some(callback) = progress {
            callback.on_file_completed(index, &record);
        }
        records.push(record);
    }

    let overall_success = records.iter().all(|r| r.success);
    let report = ExecutionReport {
        records,
        overall_success,
    };

    info!(
        "rename run finished: {} ok, {} failed{}",
        report.success_count(),
        report.failure_count(),
        if options.dry_run { " (dry run)" } else { "" }
    );

    if let Some(callback) = progress {
        callback.on_run_completed(&report);
    }

    report
}

fn rename_one(original: &Path, target: &Path, options: ExecuteOptions) -> OperationRecord {
    let failed = |reason: String| {
        OperationRecord::failed(original.to_path_buf(), target.to_path_buf(), reason)
    };

    // Collision check is best-effort, not transactional: a file created
    // between this check and the rename is not guarded against.
    if target.exists() && target != original {
        return failed(format!(
            "name collision: {} already exists",
            target.display()
        ));
    }

    if options.dry_run {
        return OperationRecord::succeeded(original.to_path_buf(), target.to_path_buf());
    }

    if options.backup {
        if let Err(e) = backup_copy(original) {
            return failed(format!("backup failed: {}", e));
        }
    }

    match fs::rename(original, target) {
        Ok(()) => OperationRecord::succeeded(original.to_path_buf(), target.to_path_buf()),
        Err(e) => failed(e.to_string()),
    }
}

/// Copy `original` into a `backup` subdirectory of its parent, creating the
/// subdirectory on first use.
fn backup_copy(original: &Path) -> std::io::Result<()> {
    let parent = original.parent().unwrap_or_else(|| Path::new(""));
    let backup_dir = parent.join("backup");
    fs::create_dir_all(&backup_dir)?;

    let file_name = original
        .file_name()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no file name"))?;
    fs::copy(original, backup_dir.join(file_name))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::collect;
    use crate::model::FileEntry;
    use crate::strategy::NamingStrategy;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;

    fn plan_for(dir: &Path, names: &[&str], proposed: &[&str]) -> RenamePlan {
        let files = names
            .iter()
            .map(|n| {
                let path = dir.join(n);
                fs::write(&path, "content").expect("Failed to write file");
                FileEntry::from_path(&path).expect("Failed to stat file")
            })
            .collect();
        RenamePlan::new(files, proposed.iter().map(|s| s.to_string()).collect())
            .expect("Failed to build plan")
    }

    #[test]
    fn test_execute_renames_files() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let plan = plan_for(temp_dir.path(), &["a.txt"], &["renamed.txt"]);

        let report = execute(&plan, ExecuteOptions::default(), None);

        assert!(report.overall_success);
        assert!(!temp_dir.path().join("a.txt").exists());
        assert!(temp_dir.path().join("renamed.txt").exists());
    }

    #[test]
    fn test_collision_leaves_filesystem_untouched() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("taken.txt"), "existing").expect("Failed to write");
        let plan = plan_for(temp_dir.path(), &["a.txt"], &["taken.txt"]);

        let report = execute(&plan, ExecuteOptions::default(), None);

        assert!(!report.overall_success);
        assert_eq!(report.failure_count(), 1);
        let record = &report.records[0];
        assert!(record.error.as_deref().unwrap().contains("collision"));

        // Neither file was touched
        assert!(temp_dir.path().join("a.txt").exists());
        let existing =
            fs::read_to_string(temp_dir.path().join("taken.txt")).expect("Failed to read");
        assert_eq!(existing, "existing");
    }

    #[test]
    fn test_rename_to_same_name_is_not_a_collision() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let plan = plan_for(temp_dir.path(), &["same.txt"], &["same.txt"]);

        let report = execute(&plan, ExecuteOptions::default(), None);

        assert!(report.overall_success);
        assert!(temp_dir.path().join("same.txt").exists());
    }

    #[test]
    fn test_dry_run_never_mutates_even_with_backup() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let plan = plan_for(temp_dir.path(), &["a.txt", "b.txt"], &["x.txt", "y.txt"]);

        let options = ExecuteOptions {
            dry_run: true,
            backup: true,
        };
        let report = execute(&plan, options, None);

        assert!(report.overall_success);
        assert_eq!(report.records.len(), 2);
        assert!(report.records.iter().all(|r| r.success));

        // Nothing moved, nothing copied
        assert!(temp_dir.path().join("a.txt").exists());
        assert!(temp_dir.path().join("b.txt").exists());
        assert!(!temp_dir.path().join("x.txt").exists());
        assert!(!temp_dir.path().join("backup").exists());
    }

    #[test]
    fn test_backup_copies_before_rename() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let plan = plan_for(temp_dir.path(), &["keep.txt"], &["moved.txt"]);

        let options = ExecuteOptions {
            dry_run: false,
            backup: true,
        };
        let report = execute(&plan, options, None);

        assert!(report.overall_success);
        assert!(temp_dir.path().join("moved.txt").exists());
        let backed_up = temp_dir.path().join("backup").join("keep.txt");
        assert!(backed_up.exists());
        assert_eq!(
            fs::read_to_string(backed_up).expect("Failed to read backup"),
            "content"
        );
    }

    #[test]
    fn test_per_file_errors_do_not_stop_the_batch() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("blocker.txt"), "").expect("Failed to write");
        // First pair collides, second is fine
        let plan = plan_for(
            temp_dir.path(),
            &["a.txt", "b.txt"],
            &["blocker.txt", "fine.txt"],
        );

        let report = execute(&plan, ExecuteOptions::default(), None);

        assert!(!report.overall_success);
        assert_eq!(report.records.len(), 2);
        assert!(!report.records[0].success);
        assert!(report.records[1].success);
        assert!(temp_dir.path().join("fine.txt").exists());
    }

    #[test]
    fn test_end_to_end_collect_propose_execute() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("a.txt"), "1").expect("Failed to write a.txt");
        fs::write(temp_dir.path().join("b.txt"), "2").expect("Failed to write b.txt");

        let mut files = collect(temp_dir.path(), "*.txt", false).expect("Failed to collect");
        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        let strategy = NamingStrategy::Sequential {
            base_name: "doc".into(),
            start_number: 1,
        };
        let proposed = strategy.propose(&files).expect("Failed to propose");
        assert_eq!(proposed, vec!["doc_001.txt", "doc_002.txt"]);

        let plan = RenamePlan::new(files, proposed).expect("Failed to build plan");
        let report = execute(&plan, ExecuteOptions::default(), None);

        assert!(report.overall_success);
        assert_eq!(report.success_count(), 2);
        assert!(temp_dir.path().join("doc_001.txt").exists());
        assert!(temp_dir.path().join("doc_002.txt").exists());
        assert!(!temp_dir.path().join("a.txt").exists());
    }

    // Test helper: records callback invocations
    struct RecordingCallback {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingCallback {
        fn new() -> Self {
            RecordingCallback {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl ProgressCallback for RecordingCallback {
        fn on_run_started(&self, plan: &RenamePlan) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("run_started({})", plan.len()));
        }

        fn on_file_started(&self, index: usize, _file: &FileEntry, _proposed: &str) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("file_started({})", index));
        }

        fn on_file_completed(&self, index: usize, record: &OperationRecord) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("file_completed({}, {})", index, record.success));
        }

        fn on_run_completed(&self, report: &ExecutionReport) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("run_completed({})", report.overall_success));
        }
    }

    #[test]
    fn test_execute_invokes_callbacks_in_order() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let plan = plan_for(temp_dir.path(), &["a.txt"], &["b.txt"]);

        let callback = RecordingCallback::new();
        let report = execute(&plan, ExecuteOptions::default(), Some(&callback));
        assert!(report.overall_success);

        let calls = callback.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                "run_started(1)",
                "file_started(0)",
                "file_completed(0, true)",
                "run_completed(true)",
            ]
        );
    }

    #[test]
    fn test_records_use_full_target_paths() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let plan = plan_for(temp_dir.path(), &["a.txt"], &["b.txt"]);

        let report = execute(&plan, ExecuteOptions::default(), None);
        let record = &report.records[0];
        assert_eq!(record.original, temp_dir.path().join("a.txt"));
        assert_eq!(record.new, PathBuf::from(temp_dir.path().join("b.txt")));
        assert!(record.error.is_none());
    }
}
