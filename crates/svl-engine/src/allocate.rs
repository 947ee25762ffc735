//! Stable id allocation.

use svl_model::{StableId, VariantList};

use crate::error::{EngineError, Result};

/// The id a newly appended variant receives.
///
/// `1` for an empty list, otherwise one past the largest id present. For
/// append-ordered lists this is the last record's id plus one; taking the
/// maximum keeps reordered lists collision-free as well.
pub fn next_stable_id(list: &VariantList) -> Result<StableId> {
    match list.max_stable_id() {
        None => Ok(StableId::FIRST),
        Some(max) => max.checked_next().ok_or(EngineError::StableIdExhausted),
    }
}

/// Monotonic id counter for one generation episode.
#[derive(Debug, Clone)]
pub struct StableIdAllocator {
    next: Option<StableId>,
}

impl Default for StableIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl StableIdAllocator {
    /// Counter starting at [`StableId::FIRST`].
    pub fn new() -> Self {
        Self::starting_at(StableId::FIRST)
    }

    pub fn starting_at(first: StableId) -> Self {
        Self { next: Some(first) }
    }

    /// Counter continuing after the ids already in `list`.
    pub fn after(list: &VariantList) -> Result<Self> {
        next_stable_id(list).map(Self::starting_at)
    }

    /// The id [`allocate`](Self::allocate) would hand out next.
    pub fn peek(&self) -> Option<StableId> {
        self.next
    }

    pub fn allocate(&mut self) -> Result<StableId> {
        let id = self.next.ok_or(EngineError::StableIdExhausted)?;
        self.next = id.checked_next();
        Ok(id)
    }

    /// Whether `count` more ids can be handed out.
    pub fn has_room_for(&self, count: usize) -> bool {
        match self.next {
            None => count == 0,
            Some(next) => {
                let remaining = u64::from(u32::MAX - next.get()) + 1;
                count as u64 <= remaining
            }
        }
    }
}
