//! Letter tiles and the shared bag.

use alloc::vec::Vec;
use core::fmt;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{letter_value, BLANK_COUNT, TILE_DISTRIBUTION};

/// A tile in a bag or hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    Letter(char),
    /// Wildcard worth zero points; takes a letter when played.
    Blank,
}

impl Tile {
    pub fn value(self) -> u32 {
        match self {
            Tile::Letter(c) => letter_value(c),
            Tile::Blank => 0,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Letter(c) => write!(f, "{}", c),
            Tile::Blank => write!(f, "_"),
        }
    }
}

/// Ordered pool of undrawn tiles. Draws come off the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TileBag {
    tiles: Vec<Tile>,
}

impl TileBag {
    /// The standard 100-tile English set, unshuffled.
    pub fn standard() -> Self {
        let mut tiles = Vec::with_capacity(crate::config::TOTAL_TILES);
        for &(letter, count, _) in TILE_DISTRIBUTION.iter() {
            tiles.extend(core::iter::repeat(Tile::Letter(letter)).take(count));
        }
        tiles.extend(core::iter::repeat(Tile::Blank).take(BLANK_COUNT));
        TileBag { tiles }
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        TileBag { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
    }

    /// Take up to `count` tiles.
    pub fn draw(&mut self, count: usize) -> Vec<Tile> {
        let keep = self.tiles.len().saturating_sub(count);
        let mut drawn = self.tiles.split_off(keep);
        drawn.reverse();
        drawn
    }

    pub fn put_back(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.tiles.extend(tiles);
    }
}
