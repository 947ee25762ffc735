//! Change notifications for document observers.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of an open document, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc-{}", self.0)
    }
}

/// Emitted after a committed change, undo or redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    /// Anything presenting the variant list must refresh it.
    ObjectInfoInvalidated(DocumentId),
    /// The document now differs from what is on disk.
    Modified(DocumentId),
}

impl DocumentEvent {
    pub fn document(&self) -> DocumentId {
        match self {
            Self::ObjectInfoInvalidated(id) | Self::Modified(id) => *id,
        }
    }
}

/// Receiver of [`DocumentEvent`]s, registered with
/// [`ShaderVariantDocument::subscribe`](crate::ShaderVariantDocument::subscribe).
pub trait DocumentObserver {
    fn notify(&mut self, event: &DocumentEvent);
}

impl<F> DocumentObserver for F
where
    F: FnMut(&DocumentEvent),
{
    fn notify(&mut self, event: &DocumentEvent) {
        self(event)
    }
}

/// Observer that records every event; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<DocumentEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DocumentEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn count_modified(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches!(event, DocumentEvent::Modified(_)))
            .count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl DocumentObserver for EventLog {
    fn notify(&mut self, event: &DocumentEvent) {
        self.events.borrow_mut().push(*event);
    }
}
