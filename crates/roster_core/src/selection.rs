use std::collections::BTreeSet;

use crate::{Record, RecordId};

/// Ids of the records currently checked for bulk actions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    ids: BTreeSet<RecordId>,
}

impl Selection {
    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn toggle(&mut self, id: RecordId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Clears when every record is selected, otherwise selects all of them.
    /// Works on the full list, not the filtered view.
    pub fn toggle_all(&mut self, records: &[Record]) {
        if self.ids.len() == records.len() {
            self.ids.clear();
        } else {
            self.ids = records.iter().map(|record| record.id.clone()).collect();
        }
    }

    pub fn remove_all(&mut self, ids: &[RecordId]) {
        for id in ids {
            self.ids.remove(id);
        }
    }

    /// Drops ids that no longer refer to a held record.
    pub fn retain_present(&mut self, records: &[Record]) {
        self.ids
            .retain(|id| records.iter().any(|record| &record.id == id));
    }

    /// Selected ids in the order the records are held.
    pub fn ordered_ids(&self, records: &[Record]) -> Vec<RecordId> {
        records
            .iter()
            .filter(|record| self.ids.contains(&record.id))
            .map(|record| record.id.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordId> {
        self.ids.iter()
    }
}
