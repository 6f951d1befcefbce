// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Fan-out/fan-in bookkeeping for requests dispatched concurrently.
//!
//! A batch is opened with the full set of keys it expects; outcomes arrive
//! in any order and the batch completes once every key has reported.

use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

/// Outstanding concurrent batch identified by a fresh id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch<K: Ord, R> {
    id: Uuid,
    expected: BTreeSet<K>,
    outcomes: BTreeMap<K, R>,
}

impl<K: Ord + Copy, R> Batch<K, R> {
    pub fn open(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            id: Uuid::new_v4(),
            expected: keys.into_iter().collect(),
            outcomes: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn expected(&self) -> usize {
        self.expected.len()
    }

    pub fn received(&self) -> usize {
        self.outcomes.len()
    }

    /// Record an outcome. Unknown keys and repeats are ignored so a key is
    /// counted at most once.
    pub fn record(&mut self, key: K, outcome: R) {
        if self.expected.contains(&key) && !self.outcomes.contains_key(&key) {
            self.outcomes.insert(key, outcome);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.len() == self.expected.len()
    }

    /// All outcomes ordered by key.
    pub fn into_outcomes(self) -> BTreeMap<K, R> {
        self.outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_after_every_key_regardless_of_order() {
        let mut batch: Batch<usize, bool> = Batch::open([0, 1, 2]);
        batch.record(2, true);
        batch.record(0, false);
        assert!(!batch.is_complete());

        batch.record(1, true);
        assert!(batch.is_complete());

        let outcomes = batch.into_outcomes();
        assert_eq!(outcomes.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn duplicate_and_foreign_keys_are_ignored() {
        let mut batch: Batch<i64, &str> = Batch::open([10, 11]);
        batch.record(10, "first");
        batch.record(10, "second");
        batch.record(99, "stranger");

        assert_eq!(batch.received(), 1);
        assert_eq!(batch.expected(), 2);
        assert_eq!(batch.into_outcomes().get(&10), Some(&"first"));
    }

    #[test]
    fn batches_get_distinct_ids() {
        let a: Batch<usize, ()> = Batch::open([0]);
        let b: Batch<usize, ()> = Batch::open([0]);
        assert_ne!(a.id(), b.id());
    }
}
