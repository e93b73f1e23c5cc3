//! The immutable description of a fill problem: slots, how they cross, and the candidate words.

use crate::crossword::{Crossword, Direction};
use crate::error::{Error, Result};
use crate::parse::{parse_overlaps, parse_slots};
use rustc_hash::{FxHashMap, FxHashSet};

/// Index of a slot in `Puzzle::slots`.
pub type SlotId = usize;

/// Index of a word in `Puzzle::words`.
pub type WordId = usize;

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Slot {
    pub(crate) start_row: usize,
    pub(crate) start_col: usize,
    pub(crate) length: usize,
    pub(crate) direction: Direction,
}

impl Slot {
    pub fn new(start_row: usize, start_col: usize, direction: Direction, length: usize) -> Slot {
        Slot {
            start_row,
            start_col,
            length,
            direction,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Character offsets of a shared cell: letter `first` of one slot sits on letter `second`
/// of the other.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Overlap {
    pub first: usize,
    pub second: usize,
}

impl Overlap {
    pub fn new(first: usize, second: usize) -> Overlap {
        Overlap { first, second }
    }

    pub fn reversed(self) -> Overlap {
        Overlap {
            first: self.second,
            second: self.first,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    letters: Vec<char>,
}

impl Word {
    fn new(text: String) -> Word {
        let letters = text.chars().collect();
        Word { text, letters }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    #[inline]
    pub fn get(&self, offset: usize) -> Option<char> {
        self.letters.get(offset).copied()
    }
}

#[derive(Debug, Clone)]
pub struct Puzzle {
    slots: Vec<Slot>,
    overlaps: FxHashMap<(SlotId, SlotId), Overlap>,
    neighbors: Vec<Vec<SlotId>>,
    words: Vec<Word>,
}

impl Puzzle {
    /// Builds a puzzle from explicit slots and overlaps. Each overlap `(x, y, o)` is stored in
    /// both directions. Duplicate words are dropped, keeping the first occurrence.
    ///
    /// Malformed overlap data is rejected here so that the solver never has to check it.
    pub fn new<I>(slots: Vec<Slot>, overlaps: I, words: Vec<String>) -> Result<Puzzle>
    where
        I: IntoIterator<Item = (SlotId, SlotId, Overlap)>,
    {
        if let Some(empty) = slots.iter().position(|slot| slot.length == 0) {
            return Err(Error::EmptySlot(empty));
        }

        let mut overlap_map: FxHashMap<(SlotId, SlotId), Overlap> = FxHashMap::default();
        let mut neighbors = vec![vec![]; slots.len()];

        for (x, y, overlap) in overlaps {
            for id in [x, y] {
                if id >= slots.len() {
                    return Err(Error::UnknownSlot(id));
                }
            }
            if x == y {
                return Err(Error::SelfOverlap(x));
            }
            if overlap.first >= slots[x].length || overlap.second >= slots[y].length {
                return Err(Error::OverlapOutOfRange {
                    x,
                    y,
                    x_offset: overlap.first,
                    y_offset: overlap.second,
                });
            }

            match overlap_map.get(&(x, y)) {
                Some(existing) if *existing != overlap => {
                    return Err(Error::ConflictingOverlap(x, y));
                }
                Some(_) => continue,
                None => {}
            }

            overlap_map.insert((x, y), overlap);
            overlap_map.insert((y, x), overlap.reversed());
            neighbors[x].push(y);
            neighbors[y].push(x);
        }

        for list in neighbors.iter_mut() {
            list.sort_unstable();
        }

        let mut seen = FxHashSet::default();
        let words = words
            .into_iter()
            .filter(|word| seen.insert(word.clone()))
            .map(Word::new)
            .collect();

        Ok(Puzzle {
            slots,
            overlaps: overlap_map,
            neighbors,
            words,
        })
    }

    /// Derives slots and crossings from a grid.
    pub fn from_crossword(crossword: &Crossword, words: Vec<String>) -> Result<Puzzle> {
        let slots = parse_slots(crossword);
        let overlaps = parse_overlaps(&slots);
        Puzzle::new(slots, overlaps, words)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> &Slot {
        &self.slots[id]
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, id: WordId) -> &Word {
        &self.words[id]
    }

    /// Offsets at which `x` and `y` cross, oriented as `(x offset, y offset)`.
    pub fn overlap(&self, x: SlotId, y: SlotId) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// Slots crossing `slot`, in ascending id order.
    pub fn neighbors(&self, slot: SlotId) -> &[SlotId] {
        &self.neighbors[slot]
    }

    pub fn degree(&self, slot: SlotId) -> usize {
        self.neighbors[slot].len()
    }
}
