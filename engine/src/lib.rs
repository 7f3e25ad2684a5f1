//! # Renamer Engine - Batch File Renaming Library
//!
//! A headless batch-renaming engine, designed as the foundation for
//! multiple UIs (CLI, GUI, automation).
//!
//! ## Overview
//!
//! The engine turns a directory scan into a rename plan and executes it:
//! - Glob-based file collection, optionally recursive
//! - Four naming strategies (sequential, template, case transform, regex)
//! - Collision-checked execution with per-file error isolation
//! - Dry-run simulation and optional backup copies
//! - Progress reporting via callbacks (decoupled from UI technology)
//! - JSON/CSV operations log and persisted user settings
//!
//! ## Basic Usage
//!
//! ```no_run
//! use engine::{collect, execute, ExecuteOptions, NamingStrategy, RenamePlan};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Scan a directory
//! let files = collect(Path::new("/photos"), "*.jpg", false)?;
//!
//! // Propose new names
//! let strategy = NamingStrategy::Sequential {
//!     base_name: "photo".to_string(),
//!     start_number: 1,
//! };
//! let proposed = strategy.propose(&files)?;
//!
//! // Preview, then execute
//! let plan = RenamePlan::new(files, proposed)?;
//! let report = execute(&plan, ExecuteOptions::default(), None);
//! println!("{} renamed, {} failed", report.success_count(), report.failure_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - **model**: Core data structures (FileEntry, RenamePlan, OperationRecord)
//! - **error**: Error types and handling
//! - **collector**: Glob-based file collection
//! - **strategy**: Naming strategies
//! - **executor**: Plan execution (collision check, backup, rename)
//! - **oplog**: Operations log serialization
//! - **settings**: Persisted user settings
//! - **progress**: Progress callback trait
//! - **format**: Human-readable size formatting

pub mod collector;
pub mod error;
pub mod executor;
pub mod format;
pub mod model;
pub mod oplog;
pub mod progress;
pub mod settings;
pub mod strategy;

// Re-export main types and functions
pub use collector::collect;
pub use error::EngineError;
pub use executor::execute;
pub use format::human_size;
pub use model::{ExecuteOptions, ExecutionReport, FileEntry, OperationRecord, RenamePlan};
pub use oplog::{LogFormat, OperationsLog};
pub use progress::ProgressCallback;
pub use settings::{Settings, StrategyKind};
pub use strategy::{CaseMode, NamingStrategy};
