//! File I/O for variant list documents.
//!
//! This module handles:
//! - Loading and saving `.shadervariantlist` files (JSON, atomic writes)
//! - Loading the `.systemoptions` defaults that sit next to a shader
//! - Loading option layouts exported from shader assets

mod load;
mod save;

use std::path::{Path, PathBuf};

pub use load::{load_option_layout, load_system_options, load_variant_list};
pub use save::save_variant_list;

/// Extension of shader source files.
pub const SHADER_EXTENSION: &str = "shader";

/// Extension of variant list documents.
pub const VARIANT_LIST_EXTENSION: &str = "shadervariantlist";

/// Extension of the system-option defaults file next to a shader.
pub const SYSTEM_OPTIONS_EXTENSION: &str = "systemoptions";

/// Kind of file a document can be opened from, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSource {
    Shader,
    VariantList,
}

impl DocumentSource {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case(SHADER_EXTENSION) {
            Some(Self::Shader)
        } else if extension.eq_ignore_ascii_case(VARIANT_LIST_EXTENSION) {
            Some(Self::VariantList)
        } else {
            None
        }
    }
}

/// `Foo.shader` -> `Foo.systemoptions`.
pub fn system_options_path(shader: &Path) -> PathBuf {
    shader.with_extension(SYSTEM_OPTIONS_EXTENSION)
}

/// `Foo.shader` -> `Foo.shadervariantlist`.
pub fn variant_list_path(shader: &Path) -> PathBuf {
    shader.with_extension(VARIANT_LIST_EXTENSION)
}

/// Resolves a list's `shaderFilePath` against the document it was read from.
///
/// Relative shader paths are relative to the document's directory. Without a
/// document path the shader path is returned as written.
pub fn resolve_shader_path(document: Option<&Path>, shader_file_path: &str) -> PathBuf {
    let shader = Path::new(shader_file_path);
    match document.and_then(Path::parent) {
        Some(base) if shader.is_relative() => base.join(shader),
        _ => shader.to_path_buf(),
    }
}
