use crate::crossword::{Crossword, Direction};
use crate::puzzle::{Overlap, Slot, SlotId};
use rustc_hash::FxHashMap;

/// Shortest run of open cells that counts as a slot.
const MIN_SLOT_LENGTH: usize = 2;

/// Finds every maximal run of open cells: across runs in row-major order, then down runs in
/// column-major order.
pub fn parse_slots(crossword: &Crossword) -> Vec<Slot> {
    let mut result = vec![];

    for row in 0..crossword.height {
        let mut start_col = None;
        for col in 0..crossword.width {
            if !crossword.is_blocked(row, col) {
                // found a cell; is it our first?
                start_col.get_or_insert(col);
            } else if let Some(start) = start_col.take() {
                push_run(&mut result, row, start, col - start, Direction::Across);
            }
        }
        // have to process end of row
        if let Some(start) = start_col {
            push_run(&mut result, row, start, crossword.width - start, Direction::Across);
        }
    }

    for col in 0..crossword.width {
        let mut start_row = None;
        for row in 0..crossword.height {
            if !crossword.is_blocked(row, col) {
                start_row.get_or_insert(row);
            } else if let Some(start) = start_row.take() {
                push_run(&mut result, start, col, row - start, Direction::Down);
            }
        }
        if let Some(start) = start_row {
            push_run(&mut result, start, col, crossword.height - start, Direction::Down);
        }
    }

    result
}

fn push_run(
    result: &mut Vec<Slot>,
    start_row: usize,
    start_col: usize,
    length: usize,
    direction: Direction,
) {
    if length >= MIN_SLOT_LENGTH {
        result.push(Slot::new(start_row, start_col, direction, length));
    }
}

/// Maps every cell covered by a slot to that slot, keyed by direction.
fn build_lookup(slots: &[Slot]) -> FxHashMap<(Direction, usize, usize), (SlotId, usize)> {
    let mut result = FxHashMap::default();

    for (slot_id, slot) in slots.iter().enumerate() {
        for index in 0..slot.length {
            let (row, col) = match slot.direction {
                Direction::Across => (slot.start_row, slot.start_col + index),
                Direction::Down => (slot.start_row + index, slot.start_col),
            };
            result.insert((slot.direction, row, col), (slot_id, index));
        }
    }

    result
}

/// Every crossing between an across slot and a down slot, oriented `(across, down)`.
pub fn parse_overlaps(slots: &[Slot]) -> Vec<(SlotId, SlotId, Overlap)> {
    let lookup = build_lookup(slots);
    let mut result = vec![];

    for (slot_id, slot) in slots.iter().enumerate() {
        if slot.direction != Direction::Across {
            continue;
        }
        for index in 0..slot.length {
            let col = slot.start_col + index;
            if let Some(&(other, other_index)) =
                lookup.get(&(Direction::Down, slot.start_row, col))
            {
                result.push((slot_id, other, Overlap::new(index, other_index)));
            }
        }
    }

    result
}
