use std::time::Instant;

use log::{debug, info, trace};

use crate::{
    arc_consistency::enforce_arc_consistency,
    domain::DomainStore,
    order::{order_domain_values, select_unassigned_variable},
    puzzle::{Puzzle, SlotId, WordId},
};

use super::{
    is_consistent, is_consistent_with, Assignment, Filler, FillerConfig, Solution, Statistics,
};

/// One open decision on the search stack: the slot being filled and the candidates not yet
/// tried for it.
struct Frame {
    slot: SlotId,
    candidates: Vec<WordId>,
    next: usize,
}

/// Node consistency, AC-3, then depth-first search with MRV / degree slot selection and
/// least-constraining-value ordering.
pub struct BacktrackingFiller {
    config: FillerConfig,
    statistics: Statistics,
}

impl BacktrackingFiller {
    pub fn new(config: FillerConfig) -> BacktrackingFiller {
        BacktrackingFiller {
            config,
            statistics: Statistics::default(),
        }
    }

    /// Counters from the most recent solve.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn solve(&mut self, puzzle: &Puzzle) -> Option<Solution> {
        self.statistics = Statistics::default();
        let pruning_start = Instant::now();

        let mut domains = DomainStore::unfiltered(puzzle);
        domains.enforce_node_consistency(puzzle);
        self.statistics.initial_candidates = domains.total();
        debug!(
            "{} candidates across {} slots after node consistency",
            self.statistics.initial_candidates,
            puzzle.slot_count()
        );

        if self.config.enforce_arc_consistency
            && !enforce_arc_consistency(puzzle, &mut domains, None)
        {
            self.statistics.pruning_time = pruning_start.elapsed();
            info!("Arc consistency proved the puzzle unsolvable");
            return None;
        }
        self.statistics.pruned_candidates = domains.total();
        self.statistics.pruning_time = pruning_start.elapsed();
        debug!(
            "{} candidates left after pruning in {}ms",
            self.statistics.pruned_candidates,
            self.statistics.pruning_time.as_millis()
        );

        let search_start = Instant::now();
        let result = self.backtrack(puzzle, &domains, Assignment::empty(puzzle));
        self.statistics.search_time = search_start.elapsed();

        match &result {
            Some(_) => info!(
                "Filled {} slots after {} states and {} backtracks",
                puzzle.slot_count(),
                self.statistics.states,
                self.statistics.backtracks
            ),
            None => info!(
                "Search exhausted after {} states and {} backtracks",
                self.statistics.states, self.statistics.backtracks
            ),
        }

        result.and_then(|assignment| assignment.to_solution(puzzle))
    }

    /// Extends `assignment` to a complete, consistent one drawing words from `domains`, or
    /// returns `None` if no extension exists.
    ///
    /// Each stack frame undoes its own tentative word before trying the next one, so sibling
    /// branches never see each other's commitments.
    pub fn backtrack(
        &mut self,
        puzzle: &Puzzle,
        domains: &DomainStore,
        mut assignment: Assignment,
    ) -> Option<Assignment> {
        if !is_consistent(puzzle, &assignment) {
            return None;
        }
        if assignment.is_complete() {
            return Some(assignment);
        }

        let search_start = Instant::now();
        let mut stack = vec![self.frame(puzzle, domains, &assignment)?];

        while let Some(frame) = stack.last_mut() {
            assignment.unassign(frame.slot);

            let word = match frame.candidates.get(frame.next).copied() {
                Some(word) => word,
                None => {
                    stack.pop();
                    self.statistics.backtracks += 1;
                    continue;
                }
            };
            frame.next += 1;
            let slot = frame.slot;

            assignment.assign(slot, word);
            self.statistics.states += 1;
            trace!(
                "Trying {} in slot {} at depth {}",
                puzzle.word(word).text(),
                slot,
                stack.len()
            );

            if self.config.progress_interval > 0
                && self.statistics.states % self.config.progress_interval == 0
            {
                debug!(
                    "{} states, {} of {} slots filled, throughput: {:.1} states/ms",
                    self.statistics.states,
                    assignment.assigned_count(),
                    puzzle.slot_count(),
                    self.statistics.states as f32
                        / search_start.elapsed().as_millis().max(1) as f32
                );
            }

            if !is_consistent_with(puzzle, &assignment, slot) {
                continue;
            }
            if assignment.is_complete() {
                return Some(assignment);
            }

            let next = self.frame(puzzle, domains, &assignment)?;
            stack.push(next);
        }

        None
    }

    fn frame(
        &self,
        puzzle: &Puzzle,
        domains: &DomainStore,
        assignment: &Assignment,
    ) -> Option<Frame> {
        let slot = select_unassigned_variable(puzzle, domains, assignment)?;
        Some(Frame {
            slot,
            candidates: order_domain_values(puzzle, domains, assignment, slot),
            next: 0,
        })
    }
}

impl Default for BacktrackingFiller {
    fn default() -> BacktrackingFiller {
        BacktrackingFiller::new(FillerConfig::default())
    }
}

impl Filler for BacktrackingFiller {
    fn fill(&mut self, puzzle: &Puzzle) -> Option<Solution> {
        self.solve(puzzle)
    }
}

#[cfg(test)]
mod tests {
    use super::BacktrackingFiller;
    use crate::crossword::Direction;
    use crate::domain::DomainStore;
    use crate::fill::{is_consistent, Assignment, Filler, FillerConfig};
    use crate::puzzle::{Overlap, Puzzle, Slot};

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn crossing_pair(list: &[&str]) -> Puzzle {
        Puzzle::new(
            vec![
                Slot::new(0, 0, Direction::Across, 3),
                Slot::new(0, 1, Direction::Down, 3),
            ],
            vec![(0, 1, Overlap::new(1, 0))],
            words(list),
        )
        .unwrap()
    }

    #[test]
    fn fills_crossing_pair() {
        let puzzle = crossing_pair(&["cat", "art"]);
        let mut filler = BacktrackingFiller::default();

        let solution = filler.fill(&puzzle).unwrap();
        assert_eq!("cat", solution.word(0));
        assert_eq!("art", solution.word(1));
    }

    #[test]
    fn reports_unsolvable_pair() {
        let puzzle = crossing_pair(&["cat", "dog"]);
        let mut filler = BacktrackingFiller::default();

        assert!(filler.fill(&puzzle).is_none());
        assert_eq!(0, filler.statistics().states);
    }

    #[test]
    fn search_alone_finds_the_same_answer() {
        let puzzle = crossing_pair(&["cat", "art", "dog"]);
        let mut filler = BacktrackingFiller::new(FillerConfig {
            enforce_arc_consistency: false,
            ..FillerConfig::default()
        });

        let solution = filler.fill(&puzzle).unwrap();
        assert_eq!(vec!["cat", "art"], solution.words());
        assert_eq!(6, filler.statistics().pruned_candidates);
    }

    #[test]
    fn search_alone_detects_failure() {
        let puzzle = crossing_pair(&["cat", "dog"]);
        let mut filler = BacktrackingFiller::new(FillerConfig {
            enforce_arc_consistency: false,
            ..FillerConfig::default()
        });

        assert!(filler.fill(&puzzle).is_none());
        assert!(filler.statistics().backtracks > 0);
    }

    #[test]
    fn isolated_slot_takes_any_word() {
        let puzzle = Puzzle::new(
            vec![Slot::new(0, 0, Direction::Across, 4)],
            vec![],
            words(&["bird", "worm", "cat"]),
        )
        .unwrap();

        let solution = BacktrackingFiller::default().fill(&puzzle).unwrap();
        assert!(["bird", "worm"].contains(&solution.word(0)));
    }

    #[test]
    fn repeated_words_are_not_allowed() {
        // Two separate 3-letter slots but only one 3-letter word.
        let puzzle = Puzzle::new(
            vec![
                Slot::new(0, 0, Direction::Across, 3),
                Slot::new(2, 0, Direction::Across, 3),
            ],
            vec![],
            words(&["cat"]),
        )
        .unwrap();

        assert!(BacktrackingFiller::default().fill(&puzzle).is_none());
    }

    #[test]
    fn backtrack_extends_partial_assignment() {
        let puzzle = crossing_pair(&["cat", "art", "cab", "bat"]);
        let domains = DomainStore::initialize(&puzzle);
        let mut filler = BacktrackingFiller::default();

        // Fixing "cab" across forces a down word starting with 'a'.
        let mut assignment = Assignment::empty(&puzzle);
        assignment.assign(0, 2);
        let result = filler.backtrack(&puzzle, &domains, assignment).unwrap();

        assert!(result.is_complete());
        assert!(is_consistent(&puzzle, &result));
        assert_eq!(Some(2), result.get(0));
        assert_eq!(Some(1), result.get(1));
    }

    #[test]
    fn backtrack_rejects_inconsistent_start() {
        let puzzle = crossing_pair(&["cat", "dog"]);
        let domains = DomainStore::initialize(&puzzle);
        let mut assignment = Assignment::empty(&puzzle);
        assignment.assign(0, 0);
        assignment.assign(1, 0);

        assert!(BacktrackingFiller::default()
            .backtrack(&puzzle, &domains, assignment)
            .is_none());
    }

    #[test]
    fn empty_puzzle_is_trivially_filled() {
        let puzzle = Puzzle::new(vec![], vec![], words(&["cat"])).unwrap();
        let solution = BacktrackingFiller::default().fill(&puzzle).unwrap();
        assert!(solution.is_empty());
    }
}
