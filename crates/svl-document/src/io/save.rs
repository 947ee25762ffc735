//! Variant list saving.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use svl_model::VariantList;

use crate::error::{DocumentError, Result};

/// Save a variant list as pretty-printed JSON.
///
/// Uses atomic write (temp file + rename) so an interrupted save never
/// leaves a truncated document behind.
pub fn save_variant_list(list: &VariantList, path: &Path) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(list)
        .map_err(|source| DocumentError::Serialization { source })?;
    bytes.push(b'\n');

    let temp_path = path.with_extension("shadervariantlist.tmp");

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DocumentError::io("create directory", parent, e))?;
    }

    let mut file =
        File::create(&temp_path).map_err(|e| DocumentError::io("create", &temp_path, e))?;
    file.write_all(&bytes)
        .map_err(|e| DocumentError::io("write", &temp_path, e))?;
    file.sync_all()
        .map_err(|e| DocumentError::io("sync", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| DocumentError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), variants = list.len(), "saved variant list");
    Ok(())
}
