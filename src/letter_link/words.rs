//! Word extraction and move scoring.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use super::bonus::{bonus_at_cell, BonusKind};
use crate::common::{GameError, PlayerId};
use crate::config::letter_value;
use crate::grid::Grid;
use crate::ship::Orientation;

/// A tile resting on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardTile {
    pub letter: char,
    /// Played from a blank; scores zero.
    pub blank: bool,
    pub placed_by: PlayerId,
}

/// A tile being placed by the current move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedTile {
    pub row: usize,
    pub col: usize,
    pub letter: char,
    pub blank: bool,
}

impl PlacedTile {
    pub fn new(row: usize, col: usize, letter: char) -> Self {
        PlacedTile {
            row,
            col,
            letter: letter.to_ascii_uppercase(),
            blank: false,
        }
    }

    fn value(&self) -> u32 {
        if self.blank {
            0
        } else {
            letter_value(self.letter)
        }
    }
}

/// The line shared by every placed tile, or `None` for a single tile.
pub fn placement_axis(placed: &[PlacedTile]) -> Result<Option<Orientation>, GameError> {
    let Some(first) = placed.first() else {
        return Ok(None);
    };
    if placed.len() < 2 {
        Ok(None)
    } else if placed.iter().all(|t| t.row == first.row) {
        Ok(Some(Orientation::Horizontal))
    } else if placed.iter().all(|t| t.col == first.col) {
        Ok(Some(Orientation::Vertical))
    } else {
        Err(GameError::TilesNotInLine)
    }
}

/// Every distinct word of two or more letters that the placement creates:
/// the word along the placement line through each tile, plus the cross word
/// through each tile. `board` is the board before the move.
///
/// The placed tiles, together with tiles already on the board, must form one
/// unbroken run along their line; an empty cell between them is rejected
/// with [`GameError::TilesNotContiguous`].
pub fn words_formed(placed: &[PlacedTile], board: &Grid<BoardTile>) -> Result<Vec<String>, GameError> {
    let axis = placement_axis(placed)?;
    let letter_at = |row: usize, col: usize| -> Option<char> {
        placed
            .iter()
            .find(|t| t.row == row && t.col == col)
            .map(|t| t.letter)
            .or_else(|| board.get(row, col).ok().flatten().map(|t| t.letter))
    };
    if let Some(axis) = axis {
        check_unbroken(placed, axis, &letter_at)?;
    }

    let mut words = BTreeSet::new();
    for tile in placed {
        for axis in [Orientation::Horizontal, Orientation::Vertical] {
            let word = word_through(tile.row, tile.col, axis, board.size(), &letter_at);
            if word.chars().count() >= 2 {
                words.insert(word);
            }
        }
    }
    Ok(words.into_iter().collect())
}

fn check_unbroken(
    placed: &[PlacedTile],
    axis: Orientation,
    letter_at: &impl Fn(usize, usize) -> Option<char>,
) -> Result<(), GameError> {
    let along = |t: &PlacedTile| match axis {
        Orientation::Horizontal => t.col,
        Orientation::Vertical => t.row,
    };
    let (Some(first), Some(lo), Some(hi)) = (
        placed.first(),
        placed.iter().map(along).min(),
        placed.iter().map(along).max(),
    ) else {
        return Ok(());
    };
    let filled = (lo..=hi).all(|i| match axis {
        Orientation::Horizontal => letter_at(first.row, i).is_some(),
        Orientation::Vertical => letter_at(i, first.col).is_some(),
    });
    if filled {
        Ok(())
    } else {
        Err(GameError::TilesNotContiguous)
    }
}

fn word_through(
    row: usize,
    col: usize,
    axis: Orientation,
    size: usize,
    letter_at: &impl Fn(usize, usize) -> Option<char>,
) -> String {
    let (dr, dc) = match axis {
        Orientation::Horizontal => (0, 1),
        Orientation::Vertical => (1, 0),
    };
    let (mut r, mut c) = (row, col);
    while r >= dr && c >= dc && letter_at(r - dr, c - dc).is_some() {
        r -= dr;
        c -= dc;
    }
    let mut word = String::new();
    while r < size && c < size {
        match letter_at(r, c) {
            Some(letter) => word.push(letter),
            None => break,
        }
        r += dr;
        c += dc;
    }
    word
}

/// Arcade score of a placement: letter values of the newly placed tiles
/// with letter bonuses, times every word bonus they cover. Tiles already on
/// the board add nothing, even when they extend a formed word.
pub fn score_move(placed: &[PlacedTile], board: &Grid<BoardTile>) -> u32 {
    let mut total = 0;
    let mut word_multiplier = 1;
    for tile in placed {
        let bonus = match board.is_empty_at(tile.row, tile.col) {
            Ok(true) => bonus_at_cell(tile.row, tile.col),
            _ => BonusKind::None,
        };
        total += tile.value() * bonus.letter_multiplier();
        word_multiplier *= bonus.word_multiplier();
    }
    total * word_multiplier
}
