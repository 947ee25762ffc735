use std::path::PathBuf;

/// What a mutating command did to the document it worked on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub command: &'static str,
    pub path: PathBuf,
    pub variants_before: usize,
    pub variants_after: usize,
    pub history_entries: usize,
    pub events: usize,
    pub notes: Vec<String>,
}

impl RunSummary {
    pub fn added(&self) -> usize {
        self.variants_after.saturating_sub(self.variants_before)
    }

    pub fn removed(&self) -> usize {
        self.variants_before.saturating_sub(self.variants_after)
    }
}
