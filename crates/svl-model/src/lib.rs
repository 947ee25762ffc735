//! Data model for shader variant lists.
//!
//! A variant list records which combinations of shader option values should be
//! compiled ahead of time for one shader. The option vocabulary comes from an
//! [`OptionCatalog`] supplied by asset loading.

pub mod catalog;
pub mod error;
pub mod ids;
pub mod option;
pub mod values;
pub mod variant;

pub use catalog::{OptionCatalog, ShaderOptionLayout};
pub use error::{CatalogError, ModelError, Result};
pub use ids::{ContentHash, StableId};
pub use option::{OptionDescriptor, OptionKind};
pub use values::OptionValues;
pub use variant::{VariantList, VariantRecord};
