use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("stable id 0 is reserved for the base shader")]
    ReservedStableId,
    #[error("shader option name must not be empty")]
    EmptyOptionName,
    #[error("shader option {name} has no legal values")]
    NoOptionValues { name: String },
    #[error("shader option {name} has an inverted index range {min}..{max}")]
    InvertedRange { name: String, min: u32, max: u32 },
    #[error("shader option {name} declares {declared} values but its index range holds {expected}")]
    ValueCountMismatch {
        name: String,
        declared: usize,
        expected: usize,
    },
    #[error("shader option {name} lists value {value} more than once")]
    DuplicateValue { name: String, value: String },
    #[error("shader option {name} is declared more than once")]
    DuplicateOption { name: String },
}

/// Failures reported by an option catalog provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The shader asset backing the catalog has not been loaded yet.
    #[error("shader option catalog is not ready")]
    NotReady,
    #[error("shader option index {index} is out of range (catalog has {count} options)")]
    OutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
