//! Caller-owned "selected record" state for the details panel.

use crate::model::record::ProcessRecord;
use crate::store::RecordStore;

/// Process number chosen for the details panel.
///
/// Owned by the front-end session; the core never stores it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSelection {
    selected: Option<String>,
}

impl RecordSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, number: impl Into<String>) {
        self.selected = Some(number.into());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected_number(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Looks the selection up in `store`; `None` when nothing matches.
    pub fn resolve<'a>(&self, store: &'a RecordStore) -> Option<&'a ProcessRecord> {
        store.find(self.selected.as_deref()?)
    }
}
