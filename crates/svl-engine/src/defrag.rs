//! Deduplication and dense renumbering of a variant list.

use std::collections::HashMap;

use tracing::debug;

use svl_model::{ContentHash, StableId, VariantList};

use crate::allocate::StableIdAllocator;
use crate::error::{EngineError, Result};

struct Survivor {
    /// Position of the kept record in the list.
    index: usize,
    /// Lowest previous stable id among the record and its duplicates.
    order: StableId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefragReport {
    pub before: usize,
    pub retained: usize,
    pub removed: usize,
}

/// Collapses records with identical options and renumbers the survivors.
///
/// The first record (in list order) of each group of equal option mappings
/// survives. Survivors are ordered by previous stable id, a group taking the
/// lowest id among its members, and renumbered `1..=n`; previous ids are not
/// preserved. The shader path and material hint are kept as they are.
///
/// Running it twice gives the same list as running it once.
pub fn defragment(list: &mut VariantList) -> Result<DefragReport> {
    let before = list.variants.len();

    // Buckets hold positions in `survivors`, which in turn hold indices into
    // the list; records are only moved once every survivor is known.
    let mut buckets: HashMap<ContentHash, Vec<usize>> = HashMap::with_capacity(before);
    let mut survivors: Vec<Survivor> = Vec::with_capacity(before);
    for (index, variant) in list.variants.iter().enumerate() {
        let bucket = buckets.entry(variant.options.content_hash()).or_default();
        let existing = bucket
            .iter()
            .copied()
            .find(|&slot| list.variants[survivors[slot].index].options == variant.options);
        match existing {
            Some(slot) => {
                let survivor = &mut survivors[slot];
                survivor.order = survivor.order.min(variant.stable_id);
            }
            None => {
                bucket.push(survivors.len());
                survivors.push(Survivor {
                    index,
                    order: variant.stable_id,
                });
            }
        }
    }
    survivors.sort_by_key(|survivor| survivor.order);

    let mut allocator = StableIdAllocator::new();
    if !allocator.has_room_for(survivors.len()) {
        return Err(EngineError::StableIdExhausted);
    }
    let ids = survivors
        .iter()
        .map(|_| allocator.allocate())
        .collect::<Result<Vec<StableId>>>()?;

    let mut slots: Vec<_> = std::mem::take(&mut list.variants)
        .into_iter()
        .map(Some)
        .collect();
    list.variants = survivors
        .iter()
        .zip(ids)
        .filter_map(|(survivor, stable_id)| {
            slots[survivor.index].take().map(|mut variant| {
                variant.stable_id = stable_id;
                variant
            })
        })
        .collect();

    let report = DefragReport {
        before,
        retained: list.variants.len(),
        removed: before - list.variants.len(),
    };
    debug!(
        before = report.before,
        retained = report.retained,
        removed = report.removed,
        "defragmented variant list"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use svl_model::{OptionValues, VariantRecord};

    fn record(id: u32, pairs: &[(&str, &str)]) -> VariantRecord {
        VariantRecord::new(
            StableId::new(id).unwrap(),
            pairs.iter().copied().collect::<OptionValues>(),
        )
    }

    #[test]
    fn empty_list_is_untouched() {
        let mut list = VariantList::new("a.shader");
        let report = defragment(&mut list).unwrap();
        assert_eq!(report, DefragReport::default());
        assert!(list.is_empty());
    }

    #[test]
    fn duplicate_group_sorts_by_lowest_id() {
        let mut list = VariantList {
            variants: vec![
                record(7, &[("a", "0")]),
                record(2, &[("a", "0")]),
                record(5, &[("a", "1")]),
            ],
            ..VariantList::default()
        };
        let report = defragment(&mut list).unwrap();
        assert_eq!(report.removed, 1);
        let ids: Vec<(u32, Option<&str>)> = list
            .variants
            .iter()
            .map(|v| (v.stable_id.get(), v.options.get("a")))
            .collect();
        // `a=0` was seen under ids 7 and 2, so it sorts before `a=1` (id 5).
        assert_eq!(ids, vec![(1, Some("0")), (2, Some("1"))]);
    }
}
