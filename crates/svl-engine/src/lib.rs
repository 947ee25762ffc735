//! Algorithms over shader variant lists.
//!
//! Everything here is a synchronous transform of a [`VariantList`] against an
//! [`OptionCatalog`]; there is no I/O and no shared state. Each mutating
//! operation takes the list by exclusive reference and either completes or
//! leaves it untouched.
//!
//! [`VariantList`]: svl_model::VariantList
//! [`OptionCatalog`]: svl_model::OptionCatalog

pub mod allocate;
pub mod append;
pub mod config;
pub mod defrag;
pub mod error;
pub mod expand;

pub use allocate::{StableIdAllocator, next_stable_id};
pub use append::{AppendedRange, add_variant_row, append_sparse_variant_set};
pub use config::ExpansionLimits;
pub use defrag::{DefragReport, defragment};
pub use error::{EngineError, Result, ValidationError};
pub use expand::{
    Expansion, ExpansionSize, ExpansionWarning, UNSET_VALUE, expand_default_configuration,
    expansion_size,
};
