// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Row selection for batch deletion.

use std::collections::BTreeSet;

use crate::models::record::RecordId;

/// Set of record ids chosen for batch deletion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<RecordId>,
}

impl Selection {
    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.ids.iter().copied().collect()
    }

    pub fn toggle(&mut self, id: RecordId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Clear everything when every page row is already selected, otherwise
    /// add the page rows. Rows on other pages are never added.
    pub fn toggle_page(&mut self, page_ids: &[RecordId]) {
        if page_ids.is_empty() {
            return;
        }
        if page_ids.iter().all(|id| self.ids.contains(id)) {
            self.ids.clear();
        } else {
            self.ids.extend(page_ids.iter().copied());
        }
    }

    /// Whether every id on the page is selected (drives the header checkbox).
    pub fn covers(&self, page_ids: &[RecordId]) -> bool {
        !page_ids.is_empty() && page_ids.iter().all(|id| self.ids.contains(id))
    }

    /// Drop ids that no longer exist in the fetched collection.
    pub fn retain_present(&mut self, present: impl Fn(RecordId) -> bool) {
        self.ids.retain(|id| present(*id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_page_selects_page_then_clears_everything() {
        let mut selection = Selection::default();
        selection.toggle(99); // selected on another page

        selection.toggle_page(&[1, 2, 3]);
        assert_eq!(selection.ids(), vec![1, 2, 3, 99]);

        selection.toggle_page(&[1, 2, 3]);
        assert!(selection.is_empty(), "full page selection clears the whole set");
    }

    #[test]
    fn partially_selected_page_gets_completed() {
        let mut selection = Selection::default();
        selection.toggle(2);

        selection.toggle_page(&[1, 2, 3]);

        assert!(selection.covers(&[1, 2, 3]));
    }

    #[test]
    fn retain_present_prunes_missing_ids() {
        let mut selection = Selection::default();
        selection.toggle(1);
        selection.toggle(2);

        selection.retain_present(|id| id == 2);

        assert_eq!(selection.ids(), vec![2]);
    }
}
