//! Tests for default-configuration expansion.

use std::collections::HashSet;

use svl_engine::{
    EngineError, ExpansionLimits, ExpansionWarning, UNSET_VALUE, expand_default_configuration,
};
use svl_model::{
    CatalogError, OptionCatalog, OptionDescriptor, OptionKind, OptionValues, ShaderOptionLayout,
    StableId,
};

fn forward_pass_layout() -> ShaderOptionLayout {
    ShaderOptionLayout::new(vec![
        OptionDescriptor::boolean("o_fog", false).unwrap(),
        OptionDescriptor::boolean("o_shadow", true).unwrap(),
        OptionDescriptor::enumeration(
            "o_opacity_mode",
            ["Opaque", "Cutout", "Blended", "TintedTransparent"],
            "Opaque",
        )
        .unwrap(),
        OptionDescriptor::range("o_cascade_count", 1, 3, 2).unwrap(),
    ])
    .unwrap()
}

fn system(pairs: &[(&str, &str)]) -> OptionValues {
    pairs.iter().copied().collect()
}

struct UnloadedShader;

impl OptionCatalog for UnloadedShader {
    fn option_count(&self) -> Result<usize, CatalogError> {
        Err(CatalogError::NotReady)
    }

    fn option(&self, _index: usize) -> Result<&OptionDescriptor, CatalogError> {
        Err(CatalogError::NotReady)
    }
}

#[test]
fn produces_the_full_cartesian_product() {
    let layout = forward_pass_layout();
    let options = system(&[
        ("o_fog", UNSET_VALUE),
        ("o_shadow", UNSET_VALUE),
        ("o_opacity_mode", UNSET_VALUE),
        ("o_cascade_count", UNSET_VALUE),
    ]);

    let expansion =
        expand_default_configuration(&layout, &options, &ExpansionLimits::default()).unwrap();

    assert_eq!(expansion.variants.len(), 2 * 2 * 4 * 3);
    assert_eq!(expansion.expected_count, 48);
    assert!(expansion.warnings.is_empty());

    let combinations: HashSet<Vec<(String, String)>> = expansion
        .variants
        .iter()
        .map(|variant| {
            variant
                .options
                .sorted()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect()
        })
        .collect();
    assert_eq!(combinations.len(), 48, "every combination is unique");
}

#[test]
fn all_defaults_record_is_first() {
    let layout = forward_pass_layout();
    let options = system(&[("o_shadow", UNSET_VALUE), ("o_cascade_count", UNSET_VALUE)]);

    let expansion =
        expand_default_configuration(&layout, &options, &ExpansionLimits::default()).unwrap();

    let first = &expansion.variants[0];
    assert_eq!(first.stable_id, StableId::FIRST);
    assert_eq!(first.options.get("o_shadow"), Some("True"));
    assert_eq!(first.options.get("o_cascade_count"), Some("2"));
}

#[test]
fn stable_ids_are_dense_and_ordered() {
    let layout = forward_pass_layout();
    let options = system(&[("o_fog", UNSET_VALUE), ("o_opacity_mode", UNSET_VALUE)]);

    let expansion =
        expand_default_configuration(&layout, &options, &ExpansionLimits::default()).unwrap();

    let ids: Vec<u32> = expansion.variants.iter().map(|v| v.stable_id.get()).collect();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
}

#[test]
fn fixed_and_unmentioned_options_are_not_enumerated() {
    let layout = forward_pass_layout();
    let options = system(&[("o_fog", "True"), ("o_shadow", UNSET_VALUE)]);

    let expansion =
        expand_default_configuration(&layout, &options, &ExpansionLimits::default()).unwrap();

    assert_eq!(expansion.variants.len(), 2);
    for variant in &expansion.variants {
        assert_eq!(variant.options.get("o_fog"), Some("True"));
        assert!(!variant.options.contains("o_opacity_mode"));
        assert!(!variant.options.contains("o_cascade_count"));
    }
    assert_eq!(expansion.variants[1].options.get("o_shadow"), Some("False"));
}

#[test]
fn later_options_multiply_earlier_combinations() {
    let layout = forward_pass_layout();
    let options = system(&[("o_fog", UNSET_VALUE), ("o_shadow", UNSET_VALUE)]);

    let expansion =
        expand_default_configuration(&layout, &options, &ExpansionLimits::default()).unwrap();

    let rows: Vec<(u32, &str, &str)> = expansion
        .variants
        .iter()
        .map(|v| {
            (
                v.stable_id.get(),
                v.options.get("o_fog").unwrap(),
                v.options.get("o_shadow").unwrap(),
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            (1, "False", "True"),
            (2, "True", "True"),
            (3, "False", "False"),
            (4, "True", "False"),
        ]
    );
}

#[test]
fn default_outside_the_enumeration_is_flagged() {
    let broken = OptionDescriptor::new(
        "o_quality",
        OptionKind::Enumeration,
        "Ultra",
        0,
        vec!["Low".to_string(), "High".to_string()],
    )
    .unwrap();
    let layout = ShaderOptionLayout::new(vec![broken]).unwrap();
    let options = system(&[("o_quality", UNSET_VALUE)]);

    let expansion =
        expand_default_configuration(&layout, &options, &ExpansionLimits::default()).unwrap();

    assert_eq!(expansion.expected_count, 2);
    assert_eq!(expansion.variants.len(), 3, "count is reported, not clamped");
    assert!(!expansion.is_consistent());
    assert_eq!(
        expansion.warnings,
        vec![ExpansionWarning::DefaultNotEnumerated {
            option: "o_quality".to_string(),
            default_value: "Ultra".to_string(),
        }]
    );
}

#[test]
fn unknown_system_options_are_reported_and_kept() {
    let layout = forward_pass_layout();
    let options = system(&[("o_fog", UNSET_VALUE), ("o_legacy_toggle", "On")]);

    let expansion =
        expand_default_configuration(&layout, &options, &ExpansionLimits::default()).unwrap();

    assert_eq!(
        expansion.warnings,
        vec![ExpansionWarning::UnknownOption {
            option: "o_legacy_toggle".to_string()
        }]
    );
    assert!(
        expansion
            .variants
            .iter()
            .all(|variant| variant.options.get("o_legacy_toggle") == Some("On"))
    );
}

#[test]
fn unloaded_catalog_is_not_ready() {
    let options = system(&[("o_fog", UNSET_VALUE)]);
    let err = expand_default_configuration(&UnloadedShader, &options, &ExpansionLimits::default())
        .unwrap_err();
    assert_eq!(err, EngineError::Catalog(CatalogError::NotReady));
}
