//! Resource limits for variant generation.

use serde::{Deserialize, Serialize};

/// Ceiling applied before a default-configuration expansion runs.
///
/// The expansion size is the product of the value counts of every unset
/// option, so a handful of multi-valued options is enough to exhaust memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionLimits {
    /// Largest number of variants a single expansion may produce.
    pub max_variants: usize,
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        Self {
            max_variants: 65_536,
        }
    }
}

impl ExpansionLimits {
    pub fn new(max_variants: usize) -> Self {
        Self { max_variants }
    }

    pub fn allows(&self, total: usize) -> bool {
        total <= self.max_variants
    }
}
