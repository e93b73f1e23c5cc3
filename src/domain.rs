//! Per-slot candidate sets. Domains only ever shrink.

use crate::puzzle::{Puzzle, SlotId, WordId};

/// Each slot's remaining candidates, as word ids in ascending (word-list) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStore {
    domains: Vec<Vec<WordId>>,
}

impl DomainStore {
    /// Every slot starts with every word, regardless of length.
    pub fn unfiltered(puzzle: &Puzzle) -> DomainStore {
        let all: Vec<WordId> = (0..puzzle.words().len()).collect();
        DomainStore {
            domains: vec![all; puzzle.slot_count()],
        }
    }

    /// Domains holding exactly the words whose length matches each slot.
    pub fn initialize(puzzle: &Puzzle) -> DomainStore {
        let mut store = DomainStore::unfiltered(puzzle);
        store.enforce_node_consistency(puzzle);
        store
    }

    /// Drops every word whose length differs from its slot's length.
    pub fn enforce_node_consistency(&mut self, puzzle: &Puzzle) {
        for (slot_id, domain) in self.domains.iter_mut().enumerate() {
            let length = puzzle.slot(slot_id).length();
            domain.retain(|&word_id| puzzle.word(word_id).len() == length);
        }
    }

    pub fn domain(&self, slot: SlotId) -> &[WordId] {
        &self.domains[slot]
    }

    pub fn len(&self, slot: SlotId) -> usize {
        self.domains[slot].len()
    }

    pub fn is_empty(&self, slot: SlotId) -> bool {
        self.domains[slot].is_empty()
    }

    pub fn contains(&self, slot: SlotId, word: WordId) -> bool {
        self.domains[slot].binary_search(&word).is_ok()
    }

    pub fn any_empty(&self) -> bool {
        self.domains.iter().any(Vec::is_empty)
    }

    /// Sum of all domain sizes.
    pub fn total(&self) -> usize {
        self.domains.iter().map(Vec::len).sum()
    }

    /// Keeps the words of `slot` for which `keep` holds. Returns whether anything was removed.
    pub(crate) fn retain<F>(&mut self, slot: SlotId, keep: F) -> bool
    where
        F: FnMut(&WordId) -> bool,
    {
        let domain = &mut self.domains[slot];
        let before = domain.len();
        domain.retain(keep);
        domain.len() != before
    }
}
