use thiserror::Error;

use crate::puzzle::SlotId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Contents are not a square.")]
    NotSquare,

    #[error("Contents have {actual} cells, expected {width}x{height}")]
    NotRectangular {
        width: usize,
        height: usize,
        actual: usize,
    },

    #[error("Unexpected character {0:?} in crossword structure")]
    InvalidCell(char),

    #[error("Slot {0} has length zero")]
    EmptySlot(SlotId),

    #[error("Overlap references unknown slot {0}")]
    UnknownSlot(SlotId),

    #[error("Slot {0} cannot overlap itself")]
    SelfOverlap(SlotId),

    #[error("Overlap ({x_offset}, {y_offset}) is out of range for slots {x} and {y}")]
    OverlapOutOfRange {
        x: SlotId,
        y: SlotId,
        x_offset: usize,
        y_offset: usize,
    },

    #[error("Slots {0} and {1} have conflicting overlaps")]
    ConflictingOverlap(SlotId, SlotId),

    #[error("Slot {0} does not fit inside the crossword")]
    SlotOutOfBounds(SlotId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed word list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Word lists must be a JSON array of strings or an object keyed by word")]
    UnexpectedJson,
}

pub type Result<T> = std::result::Result<T, Error>;
