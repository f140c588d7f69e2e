//! Fixed bonus layout of the 11×11 Letter-Link board.

use crate::config::{CENTER, LETTER_LINK_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum BonusKind {
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
    /// Centre cell; doubles the word.
    CenterStar,
}

impl BonusKind {
    pub fn letter_multiplier(self) -> u32 {
        match self {
            BonusKind::DoubleLetter => 2,
            BonusKind::TripleLetter => 3,
            _ => 1,
        }
    }

    pub fn word_multiplier(self) -> u32 {
        match self {
            BonusKind::DoubleWord | BonusKind::CenterStar => 2,
            BonusKind::TripleWord => 3,
            _ => 1,
        }
    }
}

const LAST: usize = LETTER_LINK_SIZE - 1;

const DOUBLE_LETTERS: [(usize, usize); 8] = [
    (0, 3),
    (0, 7),
    (3, 0),
    (7, 0),
    (LAST, 3),
    (LAST, 7),
    (3, LAST),
    (7, LAST),
];

/// Bonus of the cell at row-major `index`. Indices past the board have no
/// bonus.
pub fn bonus_at(index: usize) -> BonusKind {
    if index >= LETTER_LINK_SIZE * LETTER_LINK_SIZE {
        return BonusKind::None;
    }
    bonus_at_cell(index / LETTER_LINK_SIZE, index % LETTER_LINK_SIZE)
}

pub fn bonus_at_cell(row: usize, col: usize) -> BonusKind {
    if row >= LETTER_LINK_SIZE || col >= LETTER_LINK_SIZE {
        return BonusKind::None;
    }
    let on_edge = |v: usize| v == 0 || v == LAST;
    if row == CENTER && col == CENTER {
        BonusKind::CenterStar
    } else if on_edge(row) && on_edge(col) {
        BonusKind::TripleWord
    } else if (on_edge(row) && col == CENTER) || (row == CENTER && on_edge(col)) {
        BonusKind::DoubleWord
    } else if (row == col || row + col == LAST) && !on_edge(row) {
        BonusKind::TripleLetter
    } else if DOUBLE_LETTERS.contains(&(row, col)) {
        BonusKind::DoubleLetter
    } else {
        BonusKind::None
    }
}
