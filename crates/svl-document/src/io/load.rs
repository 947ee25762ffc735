//! Loading variant lists, system options and option layouts.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use svl_model::{OptionValues, ShaderOptionLayout, VariantList};

use crate::error::{DocumentError, Result};

/// Load a `.shadervariantlist` file.
pub fn load_variant_list(path: &Path) -> Result<VariantList> {
    let list: VariantList = read_json(path)?;
    if !list.has_unique_stable_ids() {
        return Err(DocumentError::DuplicateStableIds {
            path: path.to_path_buf(),
        });
    }
    info!(
        path = %path.display(),
        variants = list.len(),
        "loaded variant list"
    );
    Ok(list)
}

/// Load the system-option defaults for a shader.
///
/// A missing file is not an error: it means the shader has no defaults and
/// the caller gets `None`.
pub fn load_system_options(path: &Path) -> Result<Option<OptionValues>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no system options file");
            return Ok(None);
        }
        Err(error) => return Err(DocumentError::io("read", path, error)),
    };
    let options: OptionValues = parse_json(&text, path)?;
    debug!(path = %path.display(), options = options.len(), "loaded system options");
    Ok(Some(options))
}

/// Load an option layout: a JSON array of option descriptors.
pub fn load_option_layout(path: &Path) -> Result<ShaderOptionLayout> {
    let layout: ShaderOptionLayout = read_json(path)?;
    debug!(path = %path.display(), options = layout.len(), "loaded option layout");
    Ok(layout)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| DocumentError::io("read", path, e))?;
    parse_json(&text, path)
}

fn parse_json<T: DeserializeOwned>(text: &str, path: &Path) -> Result<T> {
    serde_json::from_str(text).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
