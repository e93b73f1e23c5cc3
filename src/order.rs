use crate::domain::DomainStore;
use crate::fill::Assignment;
use crate::puzzle::{Puzzle, SlotId, WordId};
use core::cmp::Ordering;
use rustc_hash::FxHashMap;

/// How urgently a slot should be filled next. The smallest score wins.
#[derive(Eq, PartialEq, Debug)]
pub(crate) struct SlotScore {
    remaining: usize,
    degree: usize,
    slot: SlotId,
}

impl PartialOrd for SlotScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SlotScore {
    fn cmp(&self, other: &Self) -> Ordering {
        // fewer remaining values wins
        if self.remaining != other.remaining {
            return self.remaining.cmp(&other.remaining);
        }
        // more crossings wins
        if self.degree != other.degree {
            return other.degree.cmp(&self.degree);
        }
        // lowest id wins
        self.slot.cmp(&other.slot)
    }
}

pub(crate) fn score_slot(puzzle: &Puzzle, domains: &DomainStore, slot: SlotId) -> SlotScore {
    SlotScore {
        remaining: domains.len(slot),
        degree: puzzle.degree(slot),
        slot,
    }
}

/// The open slot with the fewest candidates left, preferring slots with more crossings, then
/// the lowest slot id. `None` once every slot is assigned.
pub fn select_unassigned_variable(
    puzzle: &Puzzle,
    domains: &DomainStore,
    assignment: &Assignment,
) -> Option<SlotId> {
    (0..puzzle.slot_count())
        .filter(|&slot| !assignment.is_assigned(slot))
        .min_by_key(|&slot| score_slot(puzzle, domains, slot))
}

/// Candidates for `slot`, least constraining first. Ties keep domain order.
pub fn order_domain_values(
    puzzle: &Puzzle,
    domains: &DomainStore,
    assignment: &Assignment,
    slot: SlotId,
) -> Vec<WordId> {
    let open: Vec<SlotId> = (0..puzzle.slot_count())
        .filter(|&other| other != slot && !assignment.is_assigned(other))
        .collect();

    // For each open crossing: letter counts of its candidates at the shared cell.
    let crossing_counts: Vec<(SlotId, FxHashMap<char, usize>)> = open
        .iter()
        .filter_map(|&other| {
            let overlap = puzzle.overlap(slot, other)?;
            let mut counts = FxHashMap::default();
            for &word in domains.domain(other) {
                if let Some(letter) = puzzle.word(word).get(overlap.second) {
                    *counts.entry(letter).or_insert(0) += 1;
                }
            }
            Some((other, counts))
        })
        .collect();

    let mut scored: Vec<(usize, WordId)> = domains
        .domain(slot)
        .iter()
        .map(|&word| {
            (
                ruled_out(puzzle, domains, &open, &crossing_counts, slot, word),
                word,
            )
        })
        .collect();

    scored.sort_by_key(|(count, _)| *count);
    scored.into_iter().map(|(_, word)| word).collect()
}

/// How many candidates of the other open slots `word` would rule out if placed in `slot`.
fn ruled_out(
    puzzle: &Puzzle,
    domains: &DomainStore,
    open: &[SlotId],
    crossing_counts: &[(SlotId, FxHashMap<char, usize>)],
    slot: SlotId,
    word: WordId,
) -> usize {
    let mut count = 0;

    for &(other, ref counts) in crossing_counts {
        let overlap = match puzzle.overlap(slot, other) {
            Some(overlap) => overlap,
            None => continue,
        };
        let letter = puzzle.word(word).get(overlap.first);
        let agreeing = letter
            .and_then(|letter| counts.get(&letter))
            .copied()
            .unwrap_or(0);
        count += domains.len(other) - agreeing;

        // The word can no longer be used there either, unless it was already counted.
        if domains.contains(other, word)
            && letter.is_some()
            && letter == puzzle.word(word).get(overlap.second)
        {
            count += 1;
        }
    }

    for &other in open {
        if puzzle.overlap(slot, other).is_none() && domains.contains(other, word) {
            count += 1;
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::{order_domain_values, score_slot, select_unassigned_variable, SlotScore};
    use crate::crossword::Direction;
    use crate::domain::DomainStore;
    use crate::fill::Assignment;
    use crate::puzzle::{Overlap, Puzzle, Slot};
    use std::cmp::Ordering;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn slot_score_ord_works() {
        assert_eq!(
            SlotScore {
                remaining: 2,
                degree: 0,
                slot: 5
            }
            .cmp(&SlotScore {
                remaining: 3,
                degree: 9,
                slot: 0
            }),
            Ordering::Less
        );

        assert_eq!(
            SlotScore {
                remaining: 3,
                degree: 4,
                slot: 5
            }
            .cmp(&SlotScore {
                remaining: 3,
                degree: 2,
                slot: 0
            }),
            Ordering::Less
        );

        assert_eq!(
            SlotScore {
                remaining: 3,
                degree: 2,
                slot: 5
            }
            .cmp(&SlotScore {
                remaining: 3,
                degree: 2,
                slot: 1
            }),
            Ordering::Greater
        );
    }

    /// Slot 0 crosses slots 1 and 2; slot 3 stands alone.
    fn star() -> Puzzle {
        Puzzle::new(
            vec![
                Slot::new(0, 0, Direction::Across, 3),
                Slot::new(0, 0, Direction::Down, 3),
                Slot::new(0, 2, Direction::Down, 3),
                Slot::new(5, 0, Direction::Across, 4),
            ],
            vec![(0, 1, Overlap::new(0, 0)), (0, 2, Overlap::new(2, 0))],
            words(&["cat", "cot", "tab", "bird", "worm"]),
        )
        .unwrap()
    }

    #[test]
    fn select_prefers_fewest_remaining_values() {
        let puzzle = star();
        let domains = DomainStore::initialize(&puzzle);
        let assignment = Assignment::empty(&puzzle);

        // slot 3 has two candidates, the others three
        assert_eq!(
            Some(3),
            select_unassigned_variable(&puzzle, &domains, &assignment)
        );
    }

    #[test]
    fn select_breaks_ties_by_degree_then_id() {
        let puzzle = star();
        let domains = DomainStore::initialize(&puzzle);
        let mut assignment = Assignment::empty(&puzzle);
        assignment.assign(3, 3);

        assert_eq!(2, score_slot(&puzzle, &domains, 0).degree);
        assert_eq!(
            Some(0),
            select_unassigned_variable(&puzzle, &domains, &assignment)
        );

        assignment.assign(0, 0);
        assert_eq!(
            Some(1),
            select_unassigned_variable(&puzzle, &domains, &assignment)
        );

        assignment.assign(1, 1);
        assignment.assign(2, 2);
        assert_eq!(
            None,
            select_unassigned_variable(&puzzle, &domains, &assignment)
        );
    }

    #[test]
    fn order_prefers_least_constraining_values() {
        // Slot 0 crosses slot 1 at its first letter; slot 1's candidates start with t, c, c.
        let puzzle = Puzzle::new(
            vec![
                Slot::new(0, 0, Direction::Across, 3),
                Slot::new(0, 0, Direction::Down, 3),
            ],
            vec![(0, 1, Overlap::new(0, 0))],
            words(&["tab", "cat", "cot"]),
        )
        .unwrap();
        let domains = DomainStore::initialize(&puzzle);
        let assignment = Assignment::empty(&puzzle);

        // tab: rules out cat, cot and itself (3); cat: tab and itself (2); cot: tab and
        // itself (2).
        assert_eq!(
            vec![1, 2, 0],
            order_domain_values(&puzzle, &domains, &assignment, 0)
        );
    }

    #[test]
    fn order_counts_repeats_in_unrelated_slots() {
        let puzzle = Puzzle::new(
            vec![
                Slot::new(0, 0, Direction::Across, 4),
                Slot::new(2, 0, Direction::Across, 4),
            ],
            vec![],
            words(&["bird", "worm"]),
        )
        .unwrap();
        let mut domains = DomainStore::initialize(&puzzle);
        domains.retain(1, |&word| word == 0);
        let assignment = Assignment::empty(&puzzle);

        assert_eq!(
            vec![1, 0],
            order_domain_values(&puzzle, &domains, &assignment, 0)
        );
    }

    #[test]
    fn order_ignores_assigned_slots() {
        let puzzle = star();
        let domains = DomainStore::initialize(&puzzle);
        let mut assignment = Assignment::empty(&puzzle);
        assignment.assign(1, 0);
        assignment.assign(2, 2);

        // Nothing open crosses slot 0, and only slot 3 is open: no 3-letter word is
        // ruled out there.
        assert_eq!(
            vec![0, 1, 2],
            order_domain_values(&puzzle, &domains, &assignment, 0)
        );
    }
}
