//! Read-only access to the shader options a shader asset declares.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, ModelError};
use crate::option::OptionDescriptor;

/// Ordered set of option descriptors for one shader.
///
/// Implementations are supplied by asset loading. A provider whose asset is
/// not loaded yet must answer [`CatalogError::NotReady`] rather than pretend
/// to be empty.
pub trait OptionCatalog {
    fn option_count(&self) -> Result<usize, CatalogError>;

    fn option(&self, index: usize) -> Result<&OptionDescriptor, CatalogError>;

    /// All descriptors in catalog order.
    fn options(&self) -> Result<Vec<&OptionDescriptor>, CatalogError> {
        let count = self.option_count()?;
        (0..count).map(|index| self.option(index)).collect()
    }

    fn find(&self, name: &str) -> Result<Option<&OptionDescriptor>, CatalogError> {
        Ok(self
            .options()?
            .into_iter()
            .find(|option| option.name() == name))
    }
}

/// In-memory option layout, the shape a shader asset publishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OptionDescriptor>", into = "Vec<OptionDescriptor>")]
pub struct ShaderOptionLayout {
    options: Vec<OptionDescriptor>,
}

impl ShaderOptionLayout {
    pub fn new(options: Vec<OptionDescriptor>) -> Result<Self, ModelError> {
        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if !seen.insert(option.name()) {
                return Err(ModelError::DuplicateOption {
                    name: option.name().to_string(),
                });
            }
        }
        Ok(Self { options })
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OptionDescriptor> {
        self.options.iter()
    }
}

impl TryFrom<Vec<OptionDescriptor>> for ShaderOptionLayout {
    type Error = ModelError;

    fn try_from(options: Vec<OptionDescriptor>) -> Result<Self, Self::Error> {
        Self::new(options)
    }
}

impl From<ShaderOptionLayout> for Vec<OptionDescriptor> {
    fn from(layout: ShaderOptionLayout) -> Self {
        layout.options
    }
}

impl OptionCatalog for ShaderOptionLayout {
    fn option_count(&self) -> Result<usize, CatalogError> {
        Ok(self.options.len())
    }

    fn option(&self, index: usize) -> Result<&OptionDescriptor, CatalogError> {
        self.options.get(index).ok_or(CatalogError::OutOfRange {
            index,
            count: self.options.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ShaderOptionLayout {
        ShaderOptionLayout::new(vec![
            OptionDescriptor::boolean("o_fog", false).unwrap(),
            OptionDescriptor::enumeration("o_brdf", ["Lambert", "Burley"], "Lambert").unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn lookup_by_index_and_name() {
        let layout = layout();
        assert_eq!(layout.option_count(), Ok(2));
        assert_eq!(layout.option(1).unwrap().name(), "o_brdf");
        assert_eq!(
            layout.option(2),
            Err(CatalogError::OutOfRange { index: 2, count: 2 })
        );
        assert!(layout.find("o_fog").unwrap().is_some());
        assert!(layout.find("o_missing").unwrap().is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = ShaderOptionLayout::new(vec![
            OptionDescriptor::boolean("o_fog", false).unwrap(),
            OptionDescriptor::boolean("o_fog", true).unwrap(),
        ]);
        assert_eq!(
            result,
            Err(ModelError::DuplicateOption {
                name: "o_fog".to_string()
            })
        );
    }

    #[test]
    fn layout_round_trips_through_json() {
        let layout = layout();
        let json = serde_json::to_string(&layout).unwrap();
        let round: ShaderOptionLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(round, layout);
    }
}
