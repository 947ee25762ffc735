use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ids::StableId;
use crate::values::OptionValues;

/// One variant to pre-compile: an option assignment plus its stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    pub stable_id: StableId,
    #[serde(default)]
    pub options: OptionValues,
}

impl VariantRecord {
    pub fn new(stable_id: StableId, options: OptionValues) -> Self {
        Self { stable_id, options }
    }
}

/// The persisted state of a shader variant list document.
///
/// Variant order is meaningful: appends go to the end and defragmentation
/// orders survivors by their previous stable id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantList {
    #[serde(default)]
    pub shader_file_path: String,
    /// Opaque to the variant list; carried verbatim through every edit.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub material_options_hint: serde_json::Value,
    #[serde(default, alias = "shaderVariants")]
    pub variants: Vec<VariantRecord>,
}

impl VariantList {
    pub fn new(shader_file_path: impl Into<String>) -> Self {
        Self {
            shader_file_path: shader_file_path.into(),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn find(&self, stable_id: StableId) -> Option<&VariantRecord> {
        self.variants
            .iter()
            .find(|variant| variant.stable_id == stable_id)
    }

    /// Largest stable id in the list, regardless of position.
    pub fn max_stable_id(&self) -> Option<StableId> {
        self.variants.iter().map(|variant| variant.stable_id).max()
    }

    pub fn has_unique_stable_ids(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.variants.len());
        self.variants
            .iter()
            .all(|variant| seen.insert(variant.stable_id))
    }
}
