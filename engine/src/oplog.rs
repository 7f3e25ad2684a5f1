//! Operations log: accumulates outcome records across execute calls and
//! serializes them to a timestamped JSON or CSV file on request.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::EngineError;
use crate::model::OperationRecord;

/// Serialization format for the operations log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON array of record objects
    Json,
    /// CSV with columns original, new, timestamp, success, error
    Csv,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl LogFormat {
    /// Parse a format from its CLI/settings spelling.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Append-only record list for one session.
///
/// Records accumulate across execute calls and are only written out on an
/// explicit `save`; they are discarded when the session ends.
#[derive(Debug, Default)]
pub struct OperationsLog {
    records: Vec<OperationRecord>,
}

impl OperationsLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<I: IntoIterator<Item = OperationRecord>>(&mut self, records: I) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[OperationRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the accumulated records to a timestamped file under `log_dir`,
    /// creating the directory if needed. Returns the path written.
    pub fn save(&self, log_dir: &Path, format: LogFormat) -> Result<PathBuf, EngineError> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = log_dir.join(format!("operations_log_{}.{}", stamp, format.extension()));

        let failed = |reason: String| EngineError::LogWriteFailed {
            path: path.clone(),
            reason,
        };

        fs::create_dir_all(log_dir).map_err(|e| failed(e.to_string()))?;

        match format {
            LogFormat::Json => {
                let body = serde_json::to_string_pretty(&self.records)
                    .map_err(|e| failed(e.to_string()))?;
                fs::write(&path, body).map_err(|e| failed(e.to_string()))?;
            }
            LogFormat::Csv => {
                let mut writer =
                    csv::Writer::from_path(&path).map_err(|e| failed(e.to_string()))?;
                for record in &self.records {
                    writer
                        .serialize(record)
                        .map_err(|e| failed(e.to_string()))?;
                }
                writer.flush().map_err(|e| failed(e.to_string()))?;
            }
        }

        info!("operations log saved to {}", path.display());
        Ok(path)
    }
}
