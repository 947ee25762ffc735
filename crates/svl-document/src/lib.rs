//! Shader variant list documents.
//!
//! A [`ShaderVariantDocument`] owns one variant list, the option catalog of
//! its shader, and the edit machinery around them: transactions, undo/redo
//! and change notifications. This crate also reads and writes the files a
//! document is made of.
//!
//! # Files
//!
//! - `Foo.shader` - opening it starts a new list for that shader
//! - `Foo.systemoptions` - JSON object of option name to default value; an
//!   empty value marks the option for expansion
//! - `Foo.shadervariantlist` - the saved list, pretty-printed JSON written
//!   atomically
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use svl_document::{ShaderVariantDocument, SvlConfig, load_option_layout};
//!
//! let mut document = ShaderVariantDocument::new(SvlConfig::default());
//! document.set_catalog(Arc::new(load_option_layout(Path::new("Forward.options.json"))?));
//! document.open(Path::new("Forward.shader"))?;
//! document.append_sparse_variant_set(&["o_fog"], &["True"])?;
//! document.save_as(Path::new("Forward.shadervariantlist"))?;
//! ```

mod config;
mod document;
mod edit;
mod error;
mod events;
mod history;
mod io;

pub use config::{HistoryConfig, SvlConfig};
pub use document::{ShaderVariantDocument, SharedCatalog};
pub use edit::{EditOutcome, EditSession, lists_differ};
pub use error::{DocumentError, Result};
pub use events::{DocumentEvent, DocumentId, DocumentObserver, EventLog};
pub use history::{HistoryEntry, UndoHistory};
pub use io::{
    DocumentSource, SHADER_EXTENSION, SYSTEM_OPTIONS_EXTENSION, VARIANT_LIST_EXTENSION,
    load_option_layout, load_system_options, load_variant_list, resolve_shader_path,
    save_variant_list, system_options_path, variant_list_path,
};
