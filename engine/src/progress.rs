//! Progress reporting trait.
//!
//! Decouples the rename executor from any specific UI technology. The CLI
//! drives a terminal progress bar with it; the GUI forwards the calls over a
//! channel to the interface thread. All methods are called synchronously
//! during plan execution.

use crate::model::{ExecutionReport, FileEntry, OperationRecord, RenamePlan};

/// Trait for receiving progress updates while a rename plan executes.
pub trait ProgressCallback: Send {
    /// Called once before the first pair is processed.
    fn on_run_started(&self, plan: &RenamePlan);

    /// Called when a pair is about to be processed.
    fn on_file_started(&self, index: usize, file: &FileEntry, proposed: &str);

    /// Called when a pair is done, with its outcome record.
    fn on_file_completed(&self, index: usize, record: &OperationRecord);

    /// Called once after every pair has been processed.
    fn on_run_completed(&self, report: &ExecutionReport);
}
