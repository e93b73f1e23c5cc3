use crate::error::{Error, Result};
use crate::fill::Solution;
use crate::puzzle::{Puzzle, Slot};
use std::fmt;

pub(crate) const BLOCKED: char = '*';
pub(crate) const OPEN: char = ' ';

/// Maps the blocked and open markers of the text formats onto grid cells; letters pass
/// through unchanged.
fn read_cell(c: char) -> char {
    match c {
        '#' | '*' => BLOCKED,
        '_' => OPEN,
        other => other,
    }
}

/// A rectangular grid, stored row-major. `'*'` cells are blocked, `' '` cells are open and
/// anything else is a letter written into an open cell.
#[derive(PartialEq, Eq, Debug, Hash, Clone)]
pub struct Crossword {
    pub(crate) cells: Vec<char>,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

impl Crossword {
    /// Builds a square grid; newlines are ignored. `#` and `*` are blocked, `_` and space are
    /// open, letters are kept.
    pub fn new(contents: String) -> Result<Crossword> {
        let cells: Vec<char> = contents
            .chars()
            .filter(|c| *c != '\n')
            .map(read_cell)
            .collect();

        let width = (cells.len() as f64).sqrt() as usize;
        if width * width != cells.len() {
            return Err(Error::NotSquare);
        }
        Ok(Crossword {
            cells,
            width,
            height: width,
        })
    }

    /// Same cells as `new`, for a grid of the given size.
    pub fn rectangle(contents: String, width: usize, height: usize) -> Result<Crossword> {
        let cells: Vec<char> = contents
            .chars()
            .filter(|c| *c != '\n')
            .map(read_cell)
            .collect();

        if cells.len() != width * height {
            return Err(Error::NotRectangular {
                width,
                height,
                actual: cells.len(),
            });
        }
        Ok(Crossword {
            cells,
            width,
            height,
        })
    }

    /// Parses a structure file. `#` or `*` mark blocked cells, `_` or a space mark open cells.
    /// Trailing whitespace is dropped, so a line may only end in an open cell written as `_`.
    /// Lines may be ragged: anything past the end of a short line is blocked. Blank lines
    /// before and after the grid are ignored.
    pub fn parse(structure: &str) -> Result<Crossword> {
        let lines: Vec<&str> = structure.lines().map(str::trim_end).collect();

        let first = lines.iter().position(|line| !line.is_empty());
        let last = lines.iter().rposition(|line| !line.is_empty());
        let lines = match (first, last) {
            (Some(first), Some(last)) => &lines[first..=last],
            _ => &lines[0..0],
        };

        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let height = lines.len();

        let mut cells = Vec::with_capacity(width * height);
        for line in lines {
            let mut count = 0;
            for c in line.chars() {
                let cell = match c {
                    '#' | '*' => BLOCKED,
                    '_' | ' ' => OPEN,
                    other => return Err(Error::InvalidCell(other)),
                };
                cells.push(cell);
                count += 1;
            }
            cells.extend(std::iter::repeat(BLOCKED).take(width - count));
        }

        Ok(Crossword {
            cells,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_blocked(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.width + col] == BLOCKED
    }

    /// Letters currently written along `slot`.
    pub fn slot_letters<'s>(&'s self, slot: &'s Slot) -> SlotLetters<'s> {
        SlotLetters::new(self, slot)
    }

    fn contains(&self, slot: &Slot) -> bool {
        let (last_row, last_col) = match slot.direction {
            Direction::Across => (slot.start_row, slot.start_col + slot.length - 1),
            Direction::Down => (slot.start_row + slot.length - 1, slot.start_col),
        };
        last_row < self.height && last_col < self.width
    }

    /// Writes `word` into the cells covered by `slot`.
    pub(crate) fn fill_one_word(&self, slot: &Slot, word: &str) -> Crossword {
        let mut cells = self.cells.clone();

        match slot.direction {
            Direction::Across => {
                for (char_index, c) in word.chars().enumerate() {
                    let col = slot.start_col + char_index;
                    cells[slot.start_row * self.width + col] = c;
                }
            }
            Direction::Down => {
                for (char_index, c) in word.chars().enumerate() {
                    let row = slot.start_row + char_index;
                    cells[row * self.width + slot.start_col] = c;
                }
            }
        }

        Crossword {
            cells,
            ..*self
        }
    }

    /// Renders a solution of `puzzle` onto this grid.
    pub fn with_solution(&self, puzzle: &Puzzle, solution: &Solution) -> Result<Crossword> {
        let mut result = self.clone();
        for (slot_id, slot) in puzzle.slots().iter().enumerate() {
            if !self.contains(slot) {
                return Err(Error::SlotOutOfBounds(slot_id));
            }
            result = result.fill_one_word(slot, solution.word(slot_id));
        }
        Ok(result)
    }
}

#[derive(Clone, Debug)]
pub struct SlotLetters<'s> {
    crossword: &'s Crossword,
    slot: &'s Slot,
    index: usize,
}

impl<'s> SlotLetters<'s> {
    pub fn new(crossword: &'s Crossword, slot: &'s Slot) -> SlotLetters<'s> {
        SlotLetters {
            crossword,
            slot,
            index: 0,
        }
    }
}

impl<'s> Iterator for SlotLetters<'s> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.slot.length {
            return None;
        }

        let char_index = match self.slot.direction {
            Direction::Across => {
                self.slot.start_row * self.crossword.width + self.slot.start_col + self.index
            }
            Direction::Down => {
                (self.slot.start_row + self.index) * self.crossword.width + self.slot.start_col
            }
        };
        self.index += 1;
        self.crossword.cells.get(char_index).copied()
    }
}

impl fmt::Display for Crossword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                write!(f, "{}", self.cells[row * self.width + col])?;
                if col != self.width - 1 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;

            if row != self.height - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Direction {
    Across,
    Down,
}
