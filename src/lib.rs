pub mod arc_consistency;
pub mod crossword;
pub mod domain;
pub mod error;
pub mod fill;
pub mod order;
pub mod parse;
pub mod puzzle;
pub mod wordlist;

pub use crossword::{Crossword, Direction};
pub use domain::DomainStore;
pub use error::{Error, Result};
pub use fill::{backtracking::BacktrackingFiller, Filler, FillerConfig, Solution, Statistics};
pub use puzzle::{Overlap, Puzzle, Slot, SlotId, WordId};

/// Fills `puzzle` with the default configuration.
pub fn solve(puzzle: &Puzzle) -> Option<Solution> {
    BacktrackingFiller::default().fill(puzzle)
}

/// Derives the slots of `crossword`, fills them from `words` and writes the answer back into
/// the grid. `Ok(None)` means no fill exists.
pub fn fill_crossword(
    crossword: &Crossword,
    words: Vec<String>,
    config: FillerConfig,
) -> Result<Option<(Crossword, Statistics)>> {
    let puzzle = Puzzle::from_crossword(crossword, words)?;
    let mut filler = BacktrackingFiller::new(config);

    match filler.fill(&puzzle) {
        Some(solution) => {
            let filled = crossword.with_solution(&puzzle, &solution)?;
            Ok(Some((filled, filler.statistics().clone())))
        }
        None => Ok(None),
    }
}
