use crossbeam_channel::Receiver;
use engine::{CaseMode, FileEntry, LogFormat, OperationsLog, Settings, StrategyKind};
use std::path::{Path, PathBuf};

use crate::progress::{ProgressUpdate, RunSummary};

/// Settings file written next to the executable's working directory.
pub const SETTINGS_FILE: &str = "gui_settings.json";

/// Outcome column of a preview row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    /// Proposed name equals the current name
    Unchanged,
    /// Proposed name collides with another row or an existing file
    Conflict,
    Ok,
}

impl RowStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RowStatus::Unchanged => "unchanged",
            RowStatus::Conflict => "conflict",
            RowStatus::Ok => "ok",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreviewRow {
    pub original: String,
    pub proposed: String,
    pub status: RowStatus,
}

/// Application state, holding all UI and run-related data.
pub struct AppState {
    // Input fields
    pub directory: String,
    pub pattern: String,
    pub recursive: bool,
    pub strategy: StrategyKind,
    pub base_name: String,
    pub start_number: String,
    pub custom_pattern: String,
    pub case_mode: CaseMode,
    pub regex_pattern: String,
    pub regex_replacement: String,
    pub dry_run: bool,
    pub backup: bool,
    pub log_format: Option<LogFormat>,

    // Scan and preview state
    pub files: Vec<FileEntry>,
    pub preview: Vec<PreviewRow>,

    // Run state
    pub is_running: bool,
    pub total_files: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub current_file_name: String,
    pub updates: Option<Receiver<ProgressUpdate>>,
    pub last_summary: Option<RunSummary>,
    /// Records from every run this session; clearing the preview never
    /// discards records already collected here.
    pub oplog: OperationsLog,

    // UI state
    pub error_message: Option<String>,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        let settings = Settings::load(Path::new(SETTINGS_FILE)).unwrap_or_else(|e| {
            tracing::warn!("could not load settings: {}", e);
            Settings::default()
        });

        AppState {
            directory: settings.last_directory.display().to_string(),
            pattern: settings.pattern,
            recursive: settings.recursive,
            strategy: settings.strategy,
            base_name: settings.base_name,
            start_number: settings.start_number.to_string(),
            custom_pattern: settings.custom_pattern,
            case_mode: settings.case_mode,
            regex_pattern: settings.regex_pattern,
            regex_replacement: settings.regex_replacement,
            dry_run: settings.dry_run,
            backup: settings.backup,
            log_format: settings.log_format,

            files: Vec::new(),
            preview: Vec::new(),

            is_running: false,
            total_files: 0,
            success_count: 0,
            failure_count: 0,
            current_file_name: String::new(),
            updates: None,
            last_summary: None,
            oplog: OperationsLog::new(),

            error_message: None,
            status_message: None,
        }
    }

    /// Snapshot the current input fields as persistable settings.
    pub fn to_settings(&self) -> Settings {
        Settings {
            last_directory: PathBuf::from(&self.directory),
            pattern: self.pattern.clone(),
            recursive: self.recursive,
            strategy: self.strategy,
            base_name: self.base_name.clone(),
            start_number: self.start_number.trim().parse().unwrap_or(1),
            custom_pattern: self.custom_pattern.clone(),
            case_mode: self.case_mode,
            regex_pattern: self.regex_pattern.clone(),
            regex_replacement: self.regex_replacement.clone(),
            dry_run: self.dry_run,
            backup: self.backup,
            log_format: self.log_format,
        }
    }

    /// Pull everything the worker has sent since the last update cycle.
    pub fn drain_updates(&mut self) {
        let Some(receiver) = &self.updates else {
            return;
        };

        let pending: Vec<ProgressUpdate> = receiver.try_iter().collect();
        for update in pending {
            self.handle_progress_update(update);
        }
    }

    pub fn handle_progress_update(&mut self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::RunStarted { total_files } => {
                self.total_files = total_files;
                self.success_count = 0;
                self.failure_count = 0;
            }
            ProgressUpdate::FileStarted { name } => {
                self.current_file_name = name;
            }
            ProgressUpdate::FileCompleted { success } => {
                if success {
                    self.success_count += 1;
                } else {
                    self.failure_count += 1;
                }
            }
            ProgressUpdate::RunCompleted { summary } => {
                self.is_running = false;
                self.updates = None;
                self.current_file_name.clear();
                self.success_count = summary.success_count;
                self.failure_count = summary.failure_count;
                self.oplog.extend(summary.records.iter().cloned());
                self.last_summary = Some(summary);
                // The listing is stale after a real run
                if !self.dry_run {
                    self.files.clear();
                    self.preview.clear();
                }
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
