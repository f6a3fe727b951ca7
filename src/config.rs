use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Session settings. Read from an optional JSON file; CLI flags override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Maximum history entries kept. None keeps everything.
    pub history_limit: Option<usize>,
    /// Drop a field's warning as soon as the field is edited.
    pub clear_errors_on_edit: bool,
    pub export_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_limit: None,
            clear_errors_on_edit: false,
            export_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.check()?;
        Ok(settings)
    }

    /// Load from `path` when given, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn check(&self) -> Result<()> {
        if self.history_limit == Some(0) {
            return Err(Error::Config("history-limit must be at least 1".to_string()));
        }
        Ok(())
    }
}
