//! Undo/redo history of whole-list snapshots.

use std::collections::VecDeque;

use svl_model::VariantList;

/// One committed edit: the list before and after it.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub before: VariantList,
    pub after: VariantList,
}

/// Linear undo stack with a redo cursor.
///
/// Entries `..cursor` can be undone, entries `cursor..` redone. Recording a
/// new entry discards the redo side.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    entries: VecDeque<HistoryEntry>,
    cursor: usize,
    max_entries: usize,
}

impl UndoHistory {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: 0,
            max_entries,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.cursor);
        if self.max_entries == 0 {
            self.cursor = 0;
            return;
        }
        self.entries.push_back(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len();
    }

    /// Steps back one entry and returns the state to restore.
    pub fn undo(&mut self) -> Option<&VariantList> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).map(|entry| &entry.before)
    }

    /// Steps forward one entry and returns the state to restore.
    pub fn redo(&mut self) -> Option<&VariantList> {
        let entry = self.entries.get(self.cursor)?;
        self.cursor += 1;
        Some(&entry.after)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Number of recorded entries, undone ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
