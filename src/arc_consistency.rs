//! AC-3 over crossing letters. An arc `(x, y)` is consistent when every word left for `x` has
//! at least one word left for `y` with the same letter in the shared cell.

use crate::domain::DomainStore;
use crate::puzzle::{Puzzle, SlotId};
use log::{debug, trace};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Prune `x` using `y`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Arc {
    pub x: SlotId,
    pub y: SlotId,
}

impl Arc {
    pub fn new(x: SlotId, y: SlotId) -> Arc {
        Arc { x, y }
    }
}

/// Both directions of every crossing, in slot order.
pub fn all_arcs(puzzle: &Puzzle) -> VecDeque<Arc> {
    (0..puzzle.slot_count())
        .flat_map(|x| puzzle.neighbors(x).iter().map(move |&y| Arc::new(x, y)))
        .collect()
}

/// Removes from `x` every word with no partner in `y`. Only `x` is touched.
pub fn revise(puzzle: &Puzzle, domains: &mut DomainStore, x: SlotId, y: SlotId) -> bool {
    let overlap = match puzzle.overlap(x, y) {
        Some(overlap) => overlap,
        None => return false,
    };

    let supported: FxHashSet<char> = domains
        .domain(y)
        .iter()
        .filter_map(|&word| puzzle.word(word).get(overlap.second))
        .collect();

    domains.retain(x, |&word| {
        puzzle
            .word(word)
            .get(overlap.first)
            .map_or(false, |c| supported.contains(&c))
    })
}

/// Runs the AC-3 worklist, starting from `arcs` or from every arc in the puzzle.
///
/// Returns `false` as soon as some domain is empty.
pub fn enforce_arc_consistency(
    puzzle: &Puzzle,
    domains: &mut DomainStore,
    arcs: Option<VecDeque<Arc>>,
) -> bool {
    if domains.any_empty() {
        debug!("A domain is empty before arc consistency");
        return false;
    }

    let mut queue = arcs.unwrap_or_else(|| all_arcs(puzzle));
    let mut queued: FxHashSet<Arc> = queue.iter().copied().collect();
    let mut revisions = 0;

    while let Some(arc) = queue.pop_front() {
        queued.remove(&arc);

        if !revise(puzzle, domains, arc.x, arc.y) {
            continue;
        }
        revisions += 1;
        trace!(
            "Revised slot {} against slot {}, {} words left",
            arc.x,
            arc.y,
            domains.len(arc.x)
        );

        if domains.is_empty(arc.x) {
            debug!("Arc consistency emptied the domain of slot {}", arc.x);
            return false;
        }

        // Words just removed from x had no partner in y, so y loses nothing.
        for &z in puzzle.neighbors(arc.x) {
            if z == arc.y {
                continue;
            }
            let next = Arc::new(z, arc.x);
            if queued.insert(next) {
                queue.push_back(next);
            }
        }
    }

    debug!("Arc consistency finished after {} revisions", revisions);
    true
}
