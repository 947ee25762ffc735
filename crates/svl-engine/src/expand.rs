//! Combinatorial expansion of a shader's system-option defaults.
//!
//! The system-option file names every option the variant list should cover.
//! An option listed with a concrete value is fixed to it. An option listed
//! with an empty value is unset: the expansion enumerates every legal value
//! for it. Options the file does not mention stay unconstrained and are not
//! enumerated.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

use svl_model::{OptionCatalog, OptionDescriptor, OptionValues, VariantRecord};

use crate::allocate::StableIdAllocator;
use crate::config::ExpansionLimits;
use crate::error::{EngineError, Result};

/// Value marking an option as unset in a system-option mapping.
pub const UNSET_VALUE: &str = "";

/// Catalog inconsistencies found while expanding. None of them stop the
/// expansion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionWarning {
    /// The default is not one of the option's legal values, so no value gets
    /// skipped and the option contributes one extra variant per combination.
    #[error("default value '{default_value}' of option {option} is not one of its legal values")]
    DefaultNotEnumerated {
        option: String,
        default_value: String,
    },
    /// The system options name an option the shader does not declare. The
    /// entry is kept in the generated variants as written.
    #[error("system option {option} is not declared by the shader")]
    UnknownOption { option: String },
}

/// Result of a default-configuration expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Generated records; ids are `1..=variants.len()` in order.
    pub variants: Vec<VariantRecord>,
    /// Product of the unset options' value counts (saturating). Differs from
    /// `variants.len()` only when a [`ExpansionWarning::DefaultNotEnumerated`]
    /// was raised.
    pub expected_count: usize,
    pub warnings: Vec<ExpansionWarning>,
}

impl Expansion {
    pub fn is_consistent(&self) -> bool {
        self.variants.len() == self.expected_count
    }
}

/// Sizes of an expansion, computed without generating anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionSize {
    /// Product of value counts over unset options.
    pub expected: usize,
    /// Number of records the expansion will actually generate.
    pub generated: usize,
    pub unset_options: usize,
}

struct ExpansionPlan<'a> {
    seed: OptionValues,
    unset: Vec<&'a OptionDescriptor>,
    warnings: Vec<ExpansionWarning>,
}

impl<'a> ExpansionPlan<'a> {
    fn new<C>(catalog: &'a C, system_options: &OptionValues) -> Result<Self>
    where
        C: OptionCatalog + ?Sized,
    {
        let descriptors = catalog.options()?;
        let mut seed = system_options.clone();
        let mut unset = Vec::new();
        let mut warnings = Vec::new();

        for descriptor in &descriptors {
            if system_options.get(descriptor.name()) == Some(UNSET_VALUE) {
                seed.insert(descriptor.name(), descriptor.default_value());
                if !descriptor.default_is_enumerated() {
                    warnings.push(ExpansionWarning::DefaultNotEnumerated {
                        option: descriptor.name().to_string(),
                        default_value: descriptor.default_value().to_string(),
                    });
                }
                unset.push(*descriptor);
            }
        }

        let declared: HashSet<&str> = descriptors.iter().map(|option| option.name()).collect();
        let mut unknown: Vec<&str> = system_options
            .iter()
            .map(|(name, _)| name)
            .filter(|name| !declared.contains(name))
            .collect();
        unknown.sort_unstable();
        warnings.extend(unknown.into_iter().map(|option| ExpansionWarning::UnknownOption {
            option: option.to_string(),
        }));

        Ok(Self {
            seed,
            unset,
            warnings,
        })
    }

    fn size(&self) -> ExpansionSize {
        let mut expected = 1usize;
        let mut generated = 1usize;
        for option in &self.unset {
            let count = option.value_count();
            // Every value except the default spawns copies; a default missing
            // from the enumeration skips nothing.
            let spawned = if option.default_is_enumerated() {
                count - 1
            } else {
                count
            };
            expected = expected.saturating_mul(count);
            generated = generated.saturating_mul(spawned + 1);
        }
        ExpansionSize {
            expected,
            generated,
            unset_options: self.unset.len(),
        }
    }
}

/// Sizes the expansion of `system_options` against `catalog`.
pub fn expansion_size<C>(catalog: &C, system_options: &OptionValues) -> Result<ExpansionSize>
where
    C: OptionCatalog + ?Sized,
{
    Ok(ExpansionPlan::new(catalog, system_options)?.size())
}

/// Generates every variant implied by the system-option defaults.
///
/// The first record (stable id 1) holds the fixed values plus every unset
/// option at its catalog default. Unset options are then applied in catalog
/// order: for each non-default value, every record generated so far is
/// cloned with that value substituted. The result is the full Cartesian
/// product over unset options.
pub fn expand_default_configuration<C>(
    catalog: &C,
    system_options: &OptionValues,
    limits: &ExpansionLimits,
) -> Result<Expansion>
where
    C: OptionCatalog + ?Sized,
{
    let plan = ExpansionPlan::new(catalog, system_options)?;
    let size = plan.size();
    if !limits.allows(size.generated) {
        return Err(EngineError::ExpansionTooLarge {
            total: size.generated,
            limit: limits.max_variants,
        });
    }
    for warning in &plan.warnings {
        warn!(%warning, "inconsistent shader option catalog");
    }
    debug!(
        unset_options = size.unset_options,
        expected = size.expected,
        generated = size.generated,
        "expanding system option defaults"
    );

    let mut ids = StableIdAllocator::new();
    if !ids.has_room_for(size.generated) {
        return Err(EngineError::StableIdExhausted);
    }
    let mut variants = Vec::with_capacity(size.generated);
    variants.push(VariantRecord::new(ids.allocate()?, plan.seed));

    for option in &plan.unset {
        let existing = variants.len();
        for (_, value) in option.values() {
            if value == option.default_value() {
                continue;
            }
            for index in 0..existing {
                if !variants[index].options.contains(option.name()) {
                    continue;
                }
                let mut options = variants[index].options.clone();
                options.insert(option.name(), value);
                variants.push(VariantRecord::new(ids.allocate()?, options));
            }
        }
    }

    Ok(Expansion {
        variants,
        expected_count: size.expected,
        warnings: plan.warnings,
    })
}
