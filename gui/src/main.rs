mod progress;
mod state;
mod worker;

use iced::widget::{button, checkbox, column, container, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length, Sandbox, Settings as IcedSettings};
use std::path::Path;

use engine::{
    collect, human_size, CaseMode, ExecuteOptions, LogFormat, NamingStrategy, RenamePlan,
    StrategyKind,
};
use state::{AppState, PreviewRow, RowStatus, SETTINGS_FILE};

/// Rows shown in the file and preview listings before truncation.
const MAX_LISTED_ROWS: usize = 12;

pub fn main() -> iced::Result {
    GuiApp::run(IcedSettings::default())
}

#[derive(Debug, Clone)]
pub enum Message {
    DirectoryChanged(String),
    BrowsePressed,
    PatternChanged(String),
    RecursiveToggled(bool),
    StrategyChanged(StrategyKind),
    BaseNameChanged(String),
    StartNumberChanged(String),
    CustomPatternChanged(String),
    CaseModeChanged(CaseMode),
    RegexPatternChanged(String),
    RegexReplacementChanged(String),
    DryRunToggled(bool),
    BackupToggled(bool),
    LogFormatChanged(LogFormat),
    ScanPressed,
    PreviewPressed,
    ClearPreviewPressed,
    ExecutePressed,
    SaveLogPressed,
}

pub struct GuiApp {
    state: AppState,
}

impl Sandbox for GuiApp {
    type Message = Message;

    fn new() -> Self {
        GuiApp {
            state: AppState::new(),
        }
    }

    fn title(&self) -> String {
        "Renamer - Batch File Renaming".to_string()
    }

    fn update(&mut self, message: Message) {
        // Pick up anything the worker thread produced since the last event
        self.state.drain_updates();

        match message {
            Message::DirectoryChanged(path) => {
                self.state.directory = path;
                self.state.error_message = None;
            }
            Message::BrowsePressed => {
                if let Some(path) = rfd::FileDialog::new().pick_folder() {
                    self.state.directory = path.display().to_string();
                    self.state.error_message = None;
                }
            }
            Message::PatternChanged(pattern) => {
                self.state.pattern = pattern;
            }
            Message::RecursiveToggled(enabled) => {
                self.state.recursive = enabled;
            }
            Message::StrategyChanged(strategy) => {
                self.state.strategy = strategy;
                self.state.preview.clear();
            }
            Message::BaseNameChanged(value) => {
                self.state.base_name = value;
            }
            Message::StartNumberChanged(value) => {
                self.state.start_number = value;
            }
            Message::CustomPatternChanged(value) => {
                self.state.custom_pattern = value;
            }
            Message::CaseModeChanged(mode) => {
                self.state.case_mode = mode;
            }
            Message::RegexPatternChanged(value) => {
                self.state.regex_pattern = value;
            }
            Message::RegexReplacementChanged(value) => {
                self.state.regex_replacement = value;
            }
            Message::DryRunToggled(enabled) => {
                self.state.dry_run = enabled;
            }
            Message::BackupToggled(enabled) => {
                self.state.backup = enabled;
            }
            Message::LogFormatChanged(format) => {
                self.state.log_format = Some(format);
            }
            Message::ScanPressed => {
                self.scan();
            }
            Message::PreviewPressed => {
                self.preview();
            }
            Message::ClearPreviewPressed => {
                self.state.preview.clear();
                self.state.status_message = None;
            }
            Message::ExecutePressed => {
                self.start_run();
            }
            Message::SaveLogPressed => {
                self.save_log();
            }
        }
    }

    fn view(&self) -> Element<Message> {
        let input_section = column![
            text("Directory"),
            row![
                text_input("Enter working directory", &self.state.directory)
                    .on_input(Message::DirectoryChanged)
                    .width(Length::Fill),
                button("Browse...").on_press(Message::BrowsePressed),
            ]
            .spacing(10)
            .align_items(Alignment::Center),
            row![
                column![
                    text("File pattern"),
                    text_input("*.txt", &self.state.pattern).on_input(Message::PatternChanged),
                ]
                .width(Length::FillPortion(1)),
                checkbox("Include subdirectories", self.state.recursive)
                    .on_toggle(Message::RecursiveToggled),
            ]
            .spacing(15)
            .align_items(Alignment::End),
        ]
        .spacing(10)
        .padding(10);

        let strategy_options = vec![
            StrategyKind::Sequential,
            StrategyKind::Template,
            StrategyKind::Case,
            StrategyKind::Regex,
        ];
        let case_options = vec![
            CaseMode::Lower,
            CaseMode::Upper,
            CaseMode::Title,
            CaseMode::Camel,
        ];
        let format_options = vec![LogFormat::Json, LogFormat::Csv];

        let mut strategy_column = column![
            text("Renaming strategy"),
            pick_list(
                strategy_options,
                Some(self.state.strategy),
                Message::StrategyChanged,
            ),
        ]
        .spacing(10)
        .padding(10);

        strategy_column = match self.state.strategy {
            StrategyKind::Sequential => strategy_column.push(
                row![
                    column![
                        text("Base name"),
                        text_input("file", &self.state.base_name)
                            .on_input(Message::BaseNameChanged),
                    ]
                    .width(Length::FillPortion(2)),
                    column![
                        text("Start number"),
                        text_input("1", &self.state.start_number)
                            .on_input(Message::StartNumberChanged),
                    ]
                    .width(Length::FillPortion(1)),
                ]
                .spacing(15),
            ),
            StrategyKind::Template => strategy_column.push(column![
                text("Template ({name}, {ext}, {counter}, {date}, {time}, {size})"),
                text_input("{name}_{counter}{ext}", &self.state.custom_pattern)
                    .on_input(Message::CustomPatternChanged),
            ]),
            StrategyKind::Case => strategy_column.push(pick_list(
                case_options,
                Some(self.state.case_mode),
                Message::CaseModeChanged,
            )),
            StrategyKind::Regex => strategy_column.push(
                row![
                    column![
                        text("Pattern"),
                        text_input(r"IMG_(\d+)", &self.state.regex_pattern)
                            .on_input(Message::RegexPatternChanged),
                    ]
                    .width(Length::FillPortion(1)),
                    column![
                        text("Replacement"),
                        text_input("photo_$1", &self.state.regex_replacement)
                            .on_input(Message::RegexReplacementChanged),
                    ]
                    .width(Length::FillPortion(1)),
                ]
                .spacing(15),
            ),
        };

        let options_section = row![
            checkbox("Dry run", self.state.dry_run).on_toggle(Message::DryRunToggled),
            checkbox("Backup before rename", self.state.backup).on_toggle(Message::BackupToggled),
            pick_list(
                format_options,
                self.state.log_format,
                Message::LogFormatChanged,
            )
            .placeholder("Log format"),
        ]
        .spacing(15)
        .padding(10)
        .align_items(Alignment::Center);

        let idle = !self.state.is_running;
        let buttons = row![
            button("Scan").on_press_maybe(idle.then_some(Message::ScanPressed)),
            button("Preview").on_press_maybe(
                (idle && !self.state.files.is_empty()).then_some(Message::PreviewPressed)
            ),
            button("Clear Preview").on_press_maybe(
                (idle && !self.state.preview.is_empty()).then_some(Message::ClearPreviewPressed)
            ),
            button(if self.state.is_running {
                "Running..."
            } else {
                "Execute"
            })
            .on_press_maybe(
                (idle && !self.state.preview.is_empty()).then_some(Message::ExecutePressed)
            ),
        ]
        .spacing(10)
        .padding(10);

        let listing_section: Element<Message> = if !self.state.preview.is_empty() {
            let mut col = column![text(format!("Preview ({} files)", self.state.preview.len()))]
                .spacing(5)
                .padding(10);
            for preview_row in self.state.preview.iter().take(MAX_LISTED_ROWS) {
                col = col.push(text(format!(
                    "{} -> {} [{}]",
                    preview_row.original,
                    preview_row.proposed,
                    preview_row.status.label()
                )));
            }
            if self.state.preview.len() > MAX_LISTED_ROWS {
                col = col.push(text(format!(
                    "... and {} more",
                    self.state.preview.len() - MAX_LISTED_ROWS
                )));
            }
            col.into()
        } else if !self.state.files.is_empty() {
            let mut col = column![text(format!("Found {} files", self.state.files.len()))]
                .spacing(5)
                .padding(10);
            for file in self.state.files.iter().take(MAX_LISTED_ROWS) {
                col = col.push(text(format!(
                    "{} ({})",
                    file.file_name,
                    human_size(file.size)
                )));
            }
            if self.state.files.len() > MAX_LISTED_ROWS {
                col = col.push(text(format!(
                    "... and {} more",
                    self.state.files.len() - MAX_LISTED_ROWS
                )));
            }
            col.into()
        } else {
            text("No files scanned yet").into()
        };

        let progress_section: Element<Message> = if self.state.is_running {
            column![
                text(format!(
                    "{} / {} files",
                    self.state.success_count + self.state.failure_count,
                    self.state.total_files
                )),
                if !self.state.current_file_name.is_empty() {
                    text(format!("Current: {}", self.state.current_file_name))
                } else {
                    text("")
                },
            ]
            .spacing(10)
            .padding(10)
            .into()
        } else if let Some(summary) = &self.state.last_summary {
            let mut col = column![
                text("Run Complete"),
                text(format!(
                    "Renamed: {} | Failed: {}",
                    summary.success_count, summary.failure_count
                )),
            ]
            .spacing(5);

            if !summary.failed_items.is_empty() {
                col = col.push(text("Failed files (first 10):"));
                for (name, reason) in summary.failed_items.iter().take(10) {
                    col = col.push(text(format!("  {}: {}", name, reason)));
                }
            }

            col = col.push(button("Save operations log").on_press(Message::SaveLogPressed));
            col.spacing(10).padding(10).into()
        } else {
            text("").into()
        };

        let status_section: Element<Message> = if let Some(error) = &self.state.error_message {
            container(text(format!("ERROR: {}", error))).padding(10).into()
        } else if let Some(status) = &self.state.status_message {
            container(text(status.clone())).padding(10).into()
        } else {
            text("").into()
        };

        column![
            text("Renamer - Batch File Renaming").size(24),
            input_section,
            strategy_column,
            options_section,
            buttons,
            listing_section,
            progress_section,
            status_section,
        ]
        .spacing(10)
        .padding(20)
        .into()
    }
}

impl GuiApp {
    fn scan(&mut self) {
        self.state.error_message = None;
        self.state.status_message = None;
        self.state.preview.clear();
        self.state.last_summary = None;

        if self.state.directory.trim().is_empty() {
            self.state.error_message = Some("Directory is required".to_string());
            return;
        }

        match collect(
            Path::new(&self.state.directory),
            &self.state.pattern,
            self.state.recursive,
        ) {
            Ok(files) => {
                if files.is_empty() {
                    self.state.status_message = Some(format!(
                        "No files found with pattern '{}'",
                        self.state.pattern
                    ));
                }
                self.state.files = files;
            }
            Err(e) => {
                self.state.files.clear();
                self.state.error_message = Some(e.to_string());
            }
        }
    }

    fn build_strategy(&self) -> Result<NamingStrategy, String> {
        match self.state.strategy {
            StrategyKind::Sequential => {
                let start_number = self
                    .state
                    .start_number
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| "Start number must be a whole number".to_string())?;
                Ok(NamingStrategy::Sequential {
                    base_name: self.state.base_name.clone(),
                    start_number,
                })
            }
            StrategyKind::Template => Ok(NamingStrategy::Template {
                template: self.state.custom_pattern.clone(),
            }),
            StrategyKind::Case => Ok(NamingStrategy::CaseTransform {
                mode: self.state.case_mode,
            }),
            StrategyKind::Regex => Ok(NamingStrategy::RegexReplace {
                pattern: self.state.regex_pattern.clone(),
                replacement: self.state.regex_replacement.clone(),
            }),
        }
    }

    fn preview(&mut self) {
        self.state.error_message = None;
        self.state.status_message = None;

        let strategy = match self.build_strategy() {
            Ok(strategy) => strategy,
            Err(msg) => {
                self.state.error_message = Some(msg);
                return;
            }
        };

        let proposed = match strategy.propose(&self.state.files) {
            Ok(proposed) => proposed,
            Err(e) => {
                self.state.error_message = Some(e.to_string());
                return;
            }
        };

        self.state.preview = build_preview_rows(&self.state.files, &proposed);
    }

    fn start_run(&mut self) {
        self.state.error_message = None;
        self.state.status_message = None;
        self.state.last_summary = None;

        let proposed: Vec<String> = self
            .state
            .preview
            .iter()
            .map(|row| row.proposed.clone())
            .collect();

        let plan = match RenamePlan::new(self.state.files.clone(), proposed) {
            Ok(plan) => plan,
            Err(e) => {
                self.state.error_message = Some(e.to_string());
                return;
            }
        };

        // Persist inputs now; a Sandbox app has no shutdown hook
        if let Err(e) = self.state.to_settings().save(Path::new(SETTINGS_FILE)) {
            tracing::warn!("could not save settings: {}", e);
        }

        let options = ExecuteOptions {
            dry_run: self.state.dry_run,
            backup: self.state.backup,
        };

        let (sender, receiver) = crossbeam_channel::unbounded();
        self.state.is_running = true;
        self.state.total_files = plan.len();
        self.state.success_count = 0;
        self.state.failure_count = 0;
        self.state.updates = Some(receiver);

        worker::spawn_rename(plan, options, sender);
    }

    fn save_log(&mut self) {
        if self.state.oplog.is_empty() {
            return;
        }

        let format = self.state.log_format.unwrap_or(LogFormat::Json);
        match self.state.oplog.save(Path::new("logs"), format) {
            Ok(path) => {
                self.state.status_message =
                    Some(format!("Operations log saved to {}", path.display()));
            }
            Err(e) => {
                self.state.error_message = Some(e.to_string());
            }
        }
    }
}

/// Pair originals with proposed names and mark rows that would not change or
/// would collide with another target.
fn build_preview_rows(files: &[engine::FileEntry], proposed: &[String]) -> Vec<PreviewRow> {
    use std::collections::HashMap;

    let mut target_counts: HashMap<&str, usize> = HashMap::new();
    for name in proposed {
        *target_counts.entry(name.as_str()).or_insert(0) += 1;
    }

    files
        .iter()
        .zip(proposed)
        .map(|(file, name)| {
            let status = if *name == file.file_name {
                RowStatus::Unchanged
            } else if target_counts.get(name.as_str()).copied().unwrap_or(0) > 1
                || file.parent().join(name).exists()
            {
                RowStatus::Conflict
            } else {
                RowStatus::Ok
            };
            PreviewRow {
                original: file.file_name.clone(),
                proposed: name.clone(),
                status,
            }
        })
        .collect()
}
