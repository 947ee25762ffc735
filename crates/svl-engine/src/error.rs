use thiserror::Error;

use svl_model::CatalogError;

/// Malformed bulk-append input. Nothing is appended when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("option header is empty")]
    EmptyHeader,
    #[error("option {name} appears more than once in the header")]
    DuplicateHeader { name: String },
    #[error("value matrix holds {matrix_len} cells, not a multiple of the {header_len} header columns")]
    RaggedMatrix { matrix_len: usize, header_len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid variant set: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// `total` saturates at `usize::MAX`.
    #[error("expansion would produce {total} variants, above the limit of {limit}")]
    ExpansionTooLarge { total: usize, limit: usize },
    #[error("stable id space is exhausted")]
    StableIdExhausted,
}

pub type Result<T> = std::result::Result<T, EngineError>;
