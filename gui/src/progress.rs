use crossbeam_channel::Sender;
use engine::{ExecutionReport, FileEntry, OperationRecord, ProgressCallback, RenamePlan};

#[derive(Debug, Clone)]
pub enum ProgressUpdate {
    RunStarted {
        total_files: usize,
    },
    FileStarted {
        name: String,
    },
    FileCompleted {
        success: bool,
    },
    RunCompleted {
        summary: RunSummary,
    },
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub success_count: usize,
    pub failure_count: usize,
    pub failed_items: Vec<(String, String)>,
    pub records: Vec<OperationRecord>,
}

/// A ProgressCallback implementation that sends updates to the GUI via a channel.
pub struct GuiProgressCallback {
    sender: Sender<ProgressUpdate>,
}

impl GuiProgressCallback {
    pub fn new(sender: Sender<ProgressUpdate>) -> Self {
        GuiProgressCallback { sender }
    }
}

impl ProgressCallback for GuiProgressCallback {
    fn on_run_started(&self, plan: &RenamePlan) {
        let _ = self.sender.send(ProgressUpdate::RunStarted {
            total_files: plan.len(),
        });
    }

    fn on_file_started(&self, _index: usize, file: &FileEntry, _proposed: &str) {
        let _ = self.sender.send(ProgressUpdate::FileStarted {
            name: file.file_name.clone(),
        });
    }

    fn on_file_completed(&self, _index: usize, record: &OperationRecord) {
        let _ = self.sender.send(ProgressUpdate::FileCompleted {
            success: record.success,
        });
    }

    fn on_run_completed(&self, report: &ExecutionReport) {
        let failed_items = report
            .records
            .iter()
            .filter(|r| !r.success)
            .map(|r| {
                let name = r
                    .original
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("Unknown")
                    .to_string();
                let reason = r.error.clone().unwrap_or_else(|| "Unknown error".to_string());
                (name, reason)
            })
            .collect();

        let _ = self.sender.send(ProgressUpdate::RunCompleted {
            summary: RunSummary {
                success_count: report.success_count(),
                failure_count: report.failure_count(),
                failed_items,
                records: report.records.clone(),
            },
        });
    }
}
