//! Persisted user settings.
//!
//! A plain serde JSON document with explicit `load`/`save` operations owned
//! by whichever front-end wants persistence (the GUI reads it on startup and
//! writes it when a run is started). Nothing here touches the filesystem as
//! a side effect of construction, and failures are meant to be logged and
//! ignored by callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EngineError;
use crate::oplog::LogFormat;
use crate::strategy::CaseMode;

/// Which renaming strategy the user last selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Sequential,
    Template,
    Case,
    Regex,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "Sequential"),
            Self::Template => write!(f, "Custom pattern"),
            Self::Case => write!(f, "Case transform"),
            Self::Regex => write!(f, "Regex replace"),
        }
    }
}

/// Last-used front-end choices, persisted between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub last_directory: PathBuf,
    pub pattern: String,
    pub recursive: bool,
    pub strategy: StrategyKind,
    pub base_name: String,
    pub start_number: u32,
    pub custom_pattern: String,
    pub case_mode: CaseMode,
    pub regex_pattern: String,
    pub regex_replacement: String,
    pub dry_run: bool,
    pub backup: bool,
    pub log_format: Option<LogFormat>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            last_directory: PathBuf::from("."),
            pattern: "*".to_string(),
            recursive: false,
            strategy: StrategyKind::Sequential,
            base_name: "file".to_string(),
            start_number: 1,
            custom_pattern: "{name}_{counter}{ext}".to_string(),
            case_mode: CaseMode::Lower,
            regex_pattern: String::new(),
            regex_replacement: String::new(),
            dry_run: false,
            backup: false,
            log_format: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults; a
    /// present-but-unreadable file is an error for the caller to log.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let failed = |reason: String| EngineError::Settings {
            path: path.to_path_buf(),
            reason,
        };

        if !path.exists() {
            return Ok(Settings::default());
        }

        let body = fs::read_to_string(path).map_err(|e| failed(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| failed(e.to_string()))
    }

    /// Save settings to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), EngineError> {
        let failed = |reason: String| EngineError::Settings {
            path: path.to_path_buf(),
            reason,
        };

        let body = serde_json::to_string_pretty(self).map_err(|e| failed(e.to_string()))?;
        fs::write(path, body).map_err(|e| failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let settings =
            Settings::load(&temp_dir.path().join("nope.json")).expect("Failed to load");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_round_trip() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.last_directory = PathBuf::from("/photos");
        settings.pattern = "*.jpg".to_string();
        settings.recursive = true;
        settings.strategy = StrategyKind::Regex;
        settings.regex_pattern = r"IMG_(\d+)".to_string();
        settings.regex_replacement = "photo_$1".to_string();
        settings.log_format = Some(LogFormat::Csv);

        settings.save(&path).expect("Failed to save");
        let loaded = Settings::load(&path).expect("Failed to load");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_document_fills_in_defaults() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, r#"{"pattern": "*.png", "recursive": true}"#)
            .expect("Failed to write settings");

        let settings = Settings::load(&path).expect("Failed to load");
        assert_eq!(settings.pattern, "*.png");
        assert!(settings.recursive);
        assert_eq!(settings.base_name, "file");
        assert_eq!(settings.strategy, StrategyKind::Sequential);
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "not json").expect("Failed to write settings");

        let result = Settings::load(&path);
        assert!(matches!(result, Err(EngineError::Settings { .. })));
    }
}
