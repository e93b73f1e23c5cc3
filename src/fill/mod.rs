use crate::puzzle::{Puzzle, SlotId, WordId};
use rustc_hash::FxHashSet;
use std::fmt;
use std::time::Duration;

pub mod backtracking;

pub trait Filler {
    /// Returns a complete, consistent fill, or `None` when the puzzle has no solution.
    fn fill(&mut self, puzzle: &Puzzle) -> Option<Solution>;
}

#[derive(Debug, Clone)]
pub struct FillerConfig {
    /// Prune domains with AC-3 before searching.
    pub enforce_arc_consistency: bool,
    /// Log search progress every this many states; zero disables it.
    pub progress_interval: usize,
}

impl Default for FillerConfig {
    fn default() -> FillerConfig {
        FillerConfig {
            enforce_arc_consistency: true,
            progress_interval: 10_000,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Statistics {
    /// Tentative commitments made by the search.
    pub states: usize,
    /// Slots whose candidates ran out.
    pub backtracks: usize,
    /// Sum of domain sizes after node consistency.
    pub initial_candidates: usize,
    /// Sum of domain sizes once pruning finished.
    pub pruned_candidates: usize,
    pub pruning_time: Duration,
    pub search_time: Duration,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Candidates: {} after node consistency, {} after arc consistency",
            self.initial_candidates, self.pruned_candidates
        )?;
        writeln!(
            f,
            "Search: {} states, {} backtracks",
            self.states, self.backtracks
        )?;
        write!(
            f,
            "Time: {}ms pruning, {}ms searching",
            self.pruning_time.as_millis(),
            self.search_time.as_millis()
        )
    }
}

/// A partial mapping from slots to committed words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    words: Vec<Option<WordId>>,
    assigned: usize,
}

impl Assignment {
    pub fn empty(puzzle: &Puzzle) -> Assignment {
        Assignment {
            words: vec![None; puzzle.slot_count()],
            assigned: 0,
        }
    }

    pub fn get(&self, slot: SlotId) -> Option<WordId> {
        self.words[slot]
    }

    pub fn is_assigned(&self, slot: SlotId) -> bool {
        self.words[slot].is_some()
    }

    /// Commits `word` to `slot`, replacing any earlier commitment.
    pub fn assign(&mut self, slot: SlotId, word: WordId) {
        if self.words[slot].replace(word).is_none() {
            self.assigned += 1;
        }
    }

    pub fn unassign(&mut self, slot: SlotId) -> Option<WordId> {
        let previous = self.words[slot].take();
        if previous.is_some() {
            self.assigned -= 1;
        }
        previous
    }

    pub fn assigned(&self) -> impl Iterator<Item = (SlotId, WordId)> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(slot, word)| word.map(|word| (slot, word)))
    }

    pub fn assigned_count(&self) -> usize {
        self.assigned
    }

    /// Every slot holds a word.
    pub fn is_complete(&self) -> bool {
        self.assigned == self.words.len()
    }

    /// Spells out a complete assignment; `None` while any slot is open.
    pub fn to_solution(&self, puzzle: &Puzzle) -> Option<Solution> {
        let words = self
            .words
            .iter()
            .map(|word| word.map(|word| puzzle.word(word).text().to_string()))
            .collect::<Option<Vec<String>>>()?;
        Some(Solution { words })
    }
}

/// The words of a complete fill, indexed by slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    words: Vec<String>,
}

impl Solution {
    pub fn word(&self, slot: SlotId) -> &str {
        &self.words[slot]
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Checks the assigned slots only: right lengths, no repeated word and agreement on every
/// crossing between two assigned slots.
pub fn is_consistent(puzzle: &Puzzle, assignment: &Assignment) -> bool {
    let mut used = FxHashSet::default();

    for (slot, word) in assignment.assigned() {
        if puzzle.word(word).len() != puzzle.slot(slot).length() {
            return false;
        }
        if !used.insert(word) {
            return false;
        }
    }

    assignment.assigned().all(|(slot, _)| crossings_agree(puzzle, assignment, slot))
}

/// Checks `slot` against the other assigned slots. Enough when the assignment was consistent
/// before `slot` was committed.
pub fn is_consistent_with(puzzle: &Puzzle, assignment: &Assignment, slot: SlotId) -> bool {
    let word = match assignment.get(slot) {
        Some(word) => word,
        None => return true,
    };

    if puzzle.word(word).len() != puzzle.slot(slot).length() {
        return false;
    }

    let repeated = assignment
        .assigned()
        .any(|(other, other_word)| other != slot && other_word == word);

    !repeated && crossings_agree(puzzle, assignment, slot)
}

fn crossings_agree(puzzle: &Puzzle, assignment: &Assignment, slot: SlotId) -> bool {
    let word = match assignment.get(slot) {
        Some(word) => puzzle.word(word),
        None => return true,
    };

    puzzle.neighbors(slot).iter().all(|&neighbor| {
        let other = match assignment.get(neighbor) {
            Some(other) => puzzle.word(other),
            None => return true,
        };
        match puzzle.overlap(slot, neighbor) {
            Some(overlap) => {
                let letter = word.get(overlap.first);
                letter.is_some() && letter == other.get(overlap.second)
            }
            None => true,
        }
    })
}
