use crate::ship::ShipKind;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;
pub const FLEET: [ShipKind; NUM_SHIPS] = [
    ShipKind::Carrier,
    ShipKind::Battleship,
    ShipKind::Cruiser,
    ShipKind::Submarine,
    ShipKind::Destroyer,
];

/// Total number of ship segments in a full fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

pub const LETTER_LINK_SIZE: usize = 11;
/// Row and column of the centre star.
pub const CENTER: usize = LETTER_LINK_SIZE / 2;
pub const HAND_SIZE: usize = 7;
pub const TOTAL_TILES: usize = 100;
/// Consecutive passes (across both players) that end a Letter-Link game.
pub const MAX_CONSECUTIVE_PASSES: u32 = 4;

/// English tile distribution: (letter, count, points).
pub const TILE_DISTRIBUTION: [(char, usize, u32); 26] = [
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 4, 2),
    ('E', 12, 1),
    ('F', 2, 4),
    ('G', 3, 2),
    ('H', 2, 4),
    ('I', 9, 1),
    ('J', 1, 8),
    ('K', 1, 5),
    ('L', 4, 1),
    ('M', 2, 3),
    ('N', 6, 1),
    ('O', 8, 1),
    ('P', 2, 3),
    ('Q', 1, 10),
    ('R', 6, 1),
    ('S', 4, 1),
    ('T', 6, 1),
    ('U', 4, 1),
    ('V', 2, 4),
    ('W', 2, 4),
    ('X', 1, 8),
    ('Y', 2, 4),
    ('Z', 1, 10),
];
pub const BLANK_COUNT: usize = 2;

pub const DEFAULT_DOTS_GRID_SIZE: usize = 5;
pub const MAX_DOTS_GRID_SIZE: usize = 64;

/// Point value of a letter tile. Unknown characters score zero.
pub fn letter_value(letter: char) -> u32 {
    let upper = letter.to_ascii_uppercase();
    TILE_DISTRIBUTION
        .iter()
        .find(|(l, _, _)| *l == upper)
        .map(|(_, _, points)| *points)
        .unwrap_or(0)
}
