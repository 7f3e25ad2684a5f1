//! Renamer - Command-line interface for the batch rename engine.
//!
//! Scans a directory for files matching a glob, proposes new names with the
//! selected strategy, shows a preview table, asks for confirmation and
//! executes the plan with a progress bar.

use clap::{ArgGroup, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use tabled::{Table, Tabled};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use engine::{
    collect, execute, human_size, CaseMode, ExecuteOptions, ExecutionReport, FileEntry,
    LogFormat, NamingStrategy, OperationRecord, OperationsLog, ProgressCallback, RenamePlan,
};

/// Renamer - Batch file renaming tool
#[derive(Parser, Debug)]
#[command(name = "renamer")]
#[command(version = "0.1.0")]
#[command(about = "Rename files in batch with sequential, template, case or regex rules")]
#[command(group(
    ArgGroup::new("strategy")
        .required(true)
        .args(["sequential", "custom_pattern", "case", "regex"])
))]
struct Args {
    /// Working directory to scan
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    directory: PathBuf,

    /// Glob pattern selecting files (e.g. "*.jpg")
    #[arg(short, long, value_name = "GLOB", default_value = "*")]
    pattern: String,

    /// Also scan subdirectories
    #[arg(long)]
    recursive: bool,

    /// Sequential renaming with the given base name
    #[arg(long, value_name = "BASE_NAME")]
    sequential: Option<String>,

    /// Custom template (placeholders: {name}, {ext}, {counter}, {date}, {time}, {size})
    #[arg(long, value_name = "TEMPLATE")]
    custom_pattern: Option<String>,

    /// Case transformation: lower, upper, title or camel
    #[arg(long, value_name = "MODE")]
    case: Option<String>,

    /// Regex pattern to replace (use with --replacement)
    #[arg(long, value_name = "REGEX", requires = "replacement")]
    regex: Option<String>,

    /// Replacement string for --regex (capture groups as $1)
    #[arg(long, value_name = "STRING")]
    replacement: Option<String>,

    /// Starting number for sequential renaming
    #[arg(long, value_name = "N", default_value_t = 1)]
    start_number: u32,

    /// Simulate the operations without executing them
    #[arg(long)]
    dry_run: bool,

    /// Copy each file into a backup subdirectory before renaming
    #[arg(long)]
    backup: bool,

    /// Answer the confirmation prompt with yes (for scripted use)
    #[arg(short = 'y', long)]
    yes: bool,

    /// Logging level: DEBUG, INFO, WARNING or ERROR
    #[arg(long, value_name = "LEVEL", default_value = "INFO")]
    log_level: String,

    /// Save the operations log in the given format: json or csv
    #[arg(long, value_name = "FORMAT")]
    save_log: Option<String>,
}

/// Directory holding the run log and saved operation logs.
const LOG_DIR: &str = "logs";

/// Set up tracing with a stdout layer and a per-run file under `logs/`.
///
/// The returned guard must stay alive for the duration of the process so the
/// non-blocking file writer gets flushed.
fn init_logging(level: &str) -> Result<tracing_appender::non_blocking::WorkerGuard, String> {
    let filter = match level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => {
            return Err(format!(
                "Invalid log level '{}'. Must be DEBUG, INFO, WARNING or ERROR",
                other
            ))
        }
    };

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let file_appender =
        tracing_appender::rolling::never(LOG_DIR, format!("renamer_{}.log", stamp));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(EnvFilter::new(filter))
        .init();

    Ok(guard)
}

/// One row of the preview table.
#[derive(Tabled)]
struct PreviewRow {
    #[tabled(rename = "Original")]
    original: String,
    #[tabled(rename = "New Name")]
    new: String,
    #[tabled(rename = "Size")]
    size: String,
}

fn print_preview(files: &[FileEntry], proposed: &[String]) {
    let rows: Vec<PreviewRow> = files
        .iter()
        .zip(proposed)
        .map(|(file, new)| PreviewRow {
            original: file.file_name.clone(),
            new: new.clone(),
            size: human_size(file.size),
        })
        .collect();

    println!("{}", Table::new(rows));
}

/// CLI implementation of ProgressCallback backed by an indicatif bar.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let bar = ProgressBar::hidden();
        bar.set_style(
            ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        CliProgress { bar }
    }
}

impl ProgressCallback for CliProgress {
    fn on_run_started(&self, plan: &RenamePlan) {
        self.bar.set_length(plan.len() as u64);
        self.bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
    }

    fn on_file_started(&self, _index: usize, file: &FileEntry, _proposed: &str) {
        self.bar.set_message(file.file_name.clone());
    }

    fn on_file_completed(&self, _index: usize, record: &OperationRecord) {
        if !record.success {
            if let Some(reason) = &record.error {
                self.bar.println(format!(
                    "  failed: {} ({})",
                    record.original.display(),
                    reason
                ));
            }
        }
        self.bar.inc(1);
    }

    fn on_run_completed(&self, _report: &ExecutionReport) {
        self.bar.finish_and_clear();
    }
}

/// Ask the user to confirm a non-dry-run execution. Anything other than an
/// affirmative token aborts.
fn confirm() -> bool {
    print!("\nProceed with rename? [y/N]: ");
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }

    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn build_strategy(args: &Args) -> Result<NamingStrategy, String> {
    // clap guarantees exactly one of the strategies is present
    if let Some(base_name) = &args.sequential {
        Ok(NamingStrategy::Sequential {
            base_name: base_name.clone(),
            start_number: args.start_number,
        })
    } else if let Some(template) = &args.custom_pattern {
        Ok(NamingStrategy::Template {
            template: template.clone(),
        })
    } else if let Some(mode) = &args.case {
        let mode = CaseMode::from_str(mode).ok_or_else(|| {
            format!(
                "Invalid case mode '{}'. Must be lower, upper, title or camel",
                mode
            )
        })?;
        Ok(NamingStrategy::CaseTransform { mode })
    } else if let Some(pattern) = &args.regex {
        let replacement = args
            .replacement
            .clone()
            .ok_or_else(|| "--regex requires --replacement".to_string())?;
        Ok(NamingStrategy::RegexReplace {
            pattern: pattern.clone(),
            replacement,
        })
    } else {
        Err("No renaming strategy selected".to_string())
    }
}

fn main() {
    let args = Args::parse();

    let _guard = match init_logging(&args.log_level) {
        Ok(guard) => Some(guard),
        Err(msg) => {
            eprintln!("Error: {}", msg);
            std::process::exit(1);
        }
    };

    let exit_code = match run_cli(&args) {
        Ok(()) => 0,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            1
        }
    };

    std::process::exit(exit_code);
}

/// Main CLI logic - separated for testability.
///
/// Cancelled runs and empty scans are not errors; only validation and I/O
/// problems bubble up as `Err`.
fn run_cli(args: &Args) -> Result<(), String> {
    let strategy = build_strategy(args)?;

    // Validate everything before touching the filesystem
    let log_format = args
        .save_log
        .as_deref()
        .map(|s| {
            LogFormat::from_str(s)
                .ok_or_else(|| format!("Invalid log format '{}'. Must be json or csv", s))
        })
        .transpose()?;

    tracing::info!(
        "scanning {} (pattern '{}', recursive: {})",
        args.directory.display(),
        args.pattern,
        args.recursive
    );
    let files = collect(&args.directory, &args.pattern, args.recursive)
        .map_err(|e| e.to_string())?;

    if files.is_empty() {
        println!("No files found with pattern '{}'", args.pattern);
        return Ok(());
    }

    let proposed = strategy.propose(&files).map_err(|e| e.to_string())?;

    print_preview(&files, &proposed);

    if !args.dry_run && !args.yes && !confirm() {
        println!("Operation cancelled");
        return Ok(());
    }

    let plan = RenamePlan::new(files, proposed).map_err(|e| e.to_string())?;
    let options = ExecuteOptions {
        dry_run: args.dry_run,
        backup: args.backup,
    };

    let progress = CliProgress::new();
    let report = execute(&plan, options, Some(&progress));

    if report.overall_success {
        if args.dry_run {
            println!("Dry run: {} files would be renamed", report.success_count());
        } else {
            println!("Successfully renamed {} files!", report.success_count());
        }
    } else {
        println!(
            "{} of {} operations failed. Check the logs for details.",
            report.failure_count(),
            report.records.len()
        );
    }

    if let Some(format) = log_format {
        let mut oplog = OperationsLog::new();
        oplog.extend(report.records);
        let path = oplog
            .save(std::path::Path::new(LOG_DIR), format)
            .map_err(|e| e.to_string())?;
        println!("Operations log saved to {}", path.display());
    }

    Ok(())
}
