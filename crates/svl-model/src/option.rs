//! Shader option descriptors as exposed by a compiled shader asset.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Value domain of a shader option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionKind {
    Boolean,
    #[default]
    Enumeration,
    /// Integer range; value names are the decimal integers themselves.
    IntegerRange,
}

/// One named compile-time switch and its ordered legal values.
///
/// Value indices run from `min_index` to `max_index` inclusive. The range is
/// not anchored at zero: an integer range option `2..=5` has indices 2..=5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawOptionDescriptor")]
pub struct OptionDescriptor {
    name: String,
    kind: OptionKind,
    default_value: String,
    min_index: u32,
    values: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOptionDescriptor {
    name: String,
    #[serde(default)]
    kind: OptionKind,
    default_value: String,
    #[serde(default)]
    min_index: u32,
    #[serde(default)]
    max_index: Option<u32>,
    values: Vec<String>,
}

impl TryFrom<RawOptionDescriptor> for OptionDescriptor {
    type Error = ModelError;

    fn try_from(raw: RawOptionDescriptor) -> Result<Self> {
        let descriptor = Self::new(
            raw.name,
            raw.kind,
            raw.default_value,
            raw.min_index,
            raw.values,
        )?;
        if let Some(max_index) = raw.max_index
            && max_index != descriptor.max_index()
        {
            if max_index < descriptor.min_index {
                return Err(ModelError::InvertedRange {
                    name: descriptor.name,
                    min: descriptor.min_index,
                    max: max_index,
                });
            }
            return Err(ModelError::ValueCountMismatch {
                name: descriptor.name.clone(),
                declared: descriptor.values.len(),
                expected: (max_index - descriptor.min_index) as usize + 1,
            });
        }
        Ok(descriptor)
    }
}

impl OptionDescriptor {
    pub fn new(
        name: impl Into<String>,
        kind: OptionKind,
        default_value: impl Into<String>,
        min_index: u32,
        values: Vec<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyOptionName);
        }
        if values.is_empty() {
            return Err(ModelError::NoOptionValues { name });
        }
        let mut seen = HashSet::with_capacity(values.len());
        if let Some(value) = values.iter().find(|value| !seen.insert(value.as_str())) {
            return Err(ModelError::DuplicateValue {
                name,
                value: value.clone(),
            });
        }
        // The last index must stay representable.
        let span = u32::try_from(values.len() - 1).ok();
        if span.and_then(|span| min_index.checked_add(span)).is_none() {
            return Err(ModelError::ValueCountMismatch {
                name,
                declared: values.len(),
                expected: (u32::MAX - min_index) as usize + 1,
            });
        }
        Ok(Self {
            name,
            kind,
            default_value: default_value.into(),
            min_index,
            values,
        })
    }

    /// A `False`/`True` switch.
    pub fn boolean(name: impl Into<String>, default: bool) -> Result<Self> {
        let default_value = if default { "True" } else { "False" };
        Self::new(
            name,
            OptionKind::Boolean,
            default_value,
            0,
            vec!["False".to_string(), "True".to_string()],
        )
    }

    pub fn enumeration<I, S>(
        name: impl Into<String>,
        values: I,
        default_value: impl Into<String>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::new(name, OptionKind::Enumeration, default_value, 0, values)
    }

    pub fn range(name: impl Into<String>, min: u32, max: u32, default: u32) -> Result<Self> {
        let name = name.into();
        if min > max {
            return Err(ModelError::InvertedRange { name, min, max });
        }
        let values = (min..=max).map(|value| value.to_string()).collect();
        Self::new(
            name,
            OptionKind::IntegerRange,
            default.to_string(),
            min,
            values,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn min_index(&self) -> u32 {
        self.min_index
    }

    pub fn max_index(&self) -> u32 {
        // Checked against overflow at construction.
        self.min_index + (self.values.len() as u32 - 1)
    }

    /// Number of legal values, `max_index - min_index + 1`.
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    pub fn value_at(&self, index: u32) -> Option<&str> {
        let offset = index.checked_sub(self.min_index)? as usize;
        self.values.get(offset).map(String::as_str)
    }

    pub fn index_of(&self, value: &str) -> Option<u32> {
        self.values
            .iter()
            .position(|candidate| candidate == value)
            .map(|offset| self.min_index + offset as u32)
    }

    /// Legal values in index order, paired with their index.
    pub fn values(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(offset, value)| (self.min_index + offset as u32, value.as_str()))
    }

    /// Whether the default value is one of the enumerated values.
    pub fn default_is_enumerated(&self) -> bool {
        self.index_of(&self.default_value).is_some()
    }
}
