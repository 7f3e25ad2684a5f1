use crossbeam_channel::Sender;
use engine::{execute, ExecuteOptions, RenamePlan};
use std::thread;

use crate::progress::{GuiProgressCallback, ProgressUpdate};

/// Spawn a background worker thread to execute a rename plan.
///
/// All outcomes travel back over the channel as `ProgressUpdate` values,
/// ending with `RunCompleted`.
pub fn spawn_rename(plan: RenamePlan, options: ExecuteOptions, sender: Sender<ProgressUpdate>) {
    thread::spawn(move || {
        let callback = GuiProgressCallback::new(sender);
        let report = execute(&plan, options, Some(&callback));
        tracing::info!(
            "rename run finished: {} ok, {} failed",
            report.success_count(),
            report.failure_count()
        );
    });
}
