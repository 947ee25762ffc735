//! Settings shared by documents and the command line.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use svl_engine::ExpansionLimits;

use crate::error::{DocumentError, Result};

/// Undo history settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of undoable edits kept per document.
    ///
    /// The oldest edit is dropped once the limit is reached. Zero disables
    /// undo entirely.
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 100 }
    }
}

/// Contents of an `svl.toml` file.
///
/// ```toml
/// [expansion]
/// max_variants = 65536
///
/// [history]
/// max_entries = 100
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvlConfig {
    pub expansion: ExpansionLimits,
    pub history: HistoryConfig,
}

impl SvlConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| DocumentError::io("read", path, e))?;
        toml::from_str(&text).map_err(|source| DocumentError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn with_max_variants(mut self, max_variants: usize) -> Self {
        self.expansion.max_variants = max_variants;
        self
    }

    #[must_use]
    pub fn with_max_history(mut self, max_entries: usize) -> Self {
        self.history.max_entries = max_entries;
        self
    }
}
