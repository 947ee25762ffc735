//! Document error types.
//!
//! Every document operation either succeeds or leaves the document in its
//! last good state, so all of these are recoverable.

use std::path::PathBuf;
use thiserror::Error;

use svl_engine::EngineError;
use svl_model::CatalogError;

/// Document operation error.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected shape.
    #[error("Failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization error.
    #[error("Failed to serialize the variant list")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Two records in a loaded variant list share a stable id.
    #[error("Variant list {path} repeats a stable id")]
    DuplicateStableIds { path: PathBuf },

    #[error("Unsupported document extension: {path}")]
    UnsupportedExtension { path: PathBuf },

    /// The document was never opened or saved, so there is nowhere to save it.
    #[error("Document has no save path")]
    NoSavePath,

    #[error("An edit is already in progress")]
    EditInProgress,

    #[error("No edit is in progress")]
    NoActiveEdit,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl DocumentError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// The shader option catalog was not available.
    pub fn is_not_ready(&self) -> bool {
        matches!(
            self,
            Self::Catalog(CatalogError::NotReady)
                | Self::Engine(EngineError::Catalog(CatalogError::NotReady))
        )
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::Parse { path, source } => {
                format!("The file at {} is not valid: {}", path.display(), source)
            }
            Self::Serialization { .. } => {
                "An error occurred while writing the variant list.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::Config { path, source } => {
                format!("The configuration at {} is invalid: {}", path.display(), source)
            }
            Self::DuplicateStableIds { path } => {
                format!(
                    "The variant list at {} gives two variants the same stable id.",
                    path.display()
                )
            }
            Self::UnsupportedExtension { path } => {
                format!(
                    "'{}' is neither a shader nor a shader variant list.",
                    path.display()
                )
            }
            Self::NoSavePath => "Choose where to save the variant list first.".to_string(),
            Self::EditInProgress => {
                "Finish the current edit before starting another change.".to_string()
            }
            Self::NoActiveEdit => "There is no edit to finish.".to_string(),
            Self::Catalog(CatalogError::NotReady)
            | Self::Engine(EngineError::Catalog(CatalogError::NotReady)) => {
                "The shader has not finished loading, so its options are unknown.".to_string()
            }
            Self::Catalog(error) => error.to_string(),
            Self::Engine(error) => error.to_string(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::Parse { .. } => Some("Fix the JSON by hand or restore it from a backup.".into()),
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
            Self::DuplicateStableIds { .. } => {
                Some("Renumber the repeated stableId entries by hand.".into())
            }
            Self::UnsupportedExtension { .. } => {
                Some("Open a .shader or .shadervariantlist file.".into())
            }
            Self::Engine(EngineError::ExpansionTooLarge { .. }) => Some(
                "Fix more options in the .systemoptions file or raise expansion.max_variants."
                    .into(),
            ),
            Self::Engine(EngineError::Validation(_)) => {
                Some("Give exactly one value per header column on every row.".into())
            }
            _ if self.is_not_ready() => Some("Build the shader asset and try again.".into()),
            _ => None,
        }
    }
}

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;
