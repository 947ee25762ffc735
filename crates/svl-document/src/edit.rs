//! Edit transactions: snapshot at the start, compare at the end.

use svl_model::VariantList;

use crate::error::{DocumentError, Result};
use crate::history::HistoryEntry;

/// How an edit transaction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The list changed; an undo entry was recorded and observers notified.
    Committed,
    /// Nothing changed; no history entry and no notification.
    Unchanged,
}

/// `Idle -> Editing -> Idle` state machine holding the pre-edit snapshot.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    snapshot: Option<VariantList>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn begin(&mut self, live: &VariantList) -> Result<()> {
        if self.snapshot.is_some() {
            return Err(DocumentError::EditInProgress);
        }
        self.snapshot = Some(live.clone());
        Ok(())
    }

    /// Closes the transaction. Returns the undo entry when `live` differs
    /// from the snapshot.
    pub fn end(&mut self, live: &VariantList) -> Result<Option<HistoryEntry>> {
        let before = self.snapshot.take().ok_or(DocumentError::NoActiveEdit)?;
        if !lists_differ(&before, live) {
            return Ok(None);
        }
        Ok(Some(HistoryEntry {
            before,
            after: live.clone(),
        }))
    }

    /// Drops an open transaction without comparing.
    pub fn abandon(&mut self) {
        self.snapshot = None;
    }
}

/// Structural comparison deciding whether an edit is worth an undo entry:
/// the shader path, the variant count, or any positional pair of stable id
/// and options.
pub fn lists_differ(before: &VariantList, after: &VariantList) -> bool {
    before.shader_file_path != after.shader_file_path
        || before.variants.len() != after.variants.len()
        || before
            .variants
            .iter()
            .zip(&after.variants)
            .any(|(a, b)| a.stable_id != b.stable_id || a.options != b.options)
}
