// Computer opponents used by the simulator and tests.
// The Battleship density code is no_std and does not allocate.

use alloc::vec::Vec;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::battleship::Shot;
use crate::config::BOARD_SIZE;
use crate::dots::{DotsMove, DotsState, LineKey};
use crate::grid::Grid;
use crate::ship::{Orientation, ShipKind};

const GRID_SIZE: usize = BOARD_SIZE;

/// Placements covering more observed hits get this much more weight per hit,
/// so squares next to confirmed hits stand out.
const HIT_BIAS: f64 = 10.0;

/// Compute a probability density over all untried squares given the attack
/// log and the ship kinds still afloat. Each entry sums the relative
/// likelihood of a ship segment occupying that coordinate.
pub fn calc_pdf(log: &Grid<Shot>, afloat: &[ShipKind]) -> [[f64; GRID_SIZE]; GRID_SIZE] {
    let mut matrix = [[0.0f64; GRID_SIZE]; GRID_SIZE];
    let shot = |r: usize, c: usize| log.get(r, c).ok().flatten().copied();

    for kind in afloat {
        let len = kind.size();
        for orient in [Orientation::Horizontal, Orientation::Vertical] {
            let (max_row, max_col) = match orient {
                Orientation::Vertical => (GRID_SIZE - len + 1, GRID_SIZE),
                Orientation::Horizontal => (GRID_SIZE, GRID_SIZE - len + 1),
            };
            for r in 0..max_row {
                for c in 0..max_col {
                    let mut valid = true;
                    let mut n_hits = 0;
                    for (rr, cc) in orient.cells(r, c, len) {
                        match shot(rr, cc) {
                            Some(Shot::Miss) => {
                                valid = false;
                                break;
                            }
                            Some(Shot::Hit) => n_hits += 1,
                            None => {}
                        }
                    }
                    if !valid {
                        continue;
                    }
                    let weight = libm::pow(HIT_BIAS, n_hits as f64);
                    for (rr, cc) in orient.cells(r, c, len) {
                        if shot(rr, cc).is_none() {
                            matrix[rr][cc] += weight;
                        }
                    }
                }
            }
        }
    }

    normalize(matrix, log)
}

fn normalize(
    mut matrix: [[f64; GRID_SIZE]; GRID_SIZE],
    log: &Grid<Shot>,
) -> [[f64; GRID_SIZE]; GRID_SIZE] {
    let total: f64 = matrix.iter().flat_map(|row| row.iter()).sum();
    if total == 0.0 {
        // Nothing fits: spread evenly over untried squares.
        let untried = GRID_SIZE * GRID_SIZE - log.count_occupied();
        let uniform = if untried == 0 { 0.0 } else { 1.0 / untried as f64 };
        for (r, row) in matrix.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = if matches!(log.get(r, c), Ok(None)) { uniform } else { 0.0 };
            }
        }
        return matrix;
    }
    for row in matrix.iter_mut() {
        for v in row.iter_mut() {
            *v /= total;
        }
    }
    matrix
}

/// Sample a coordinate from a probability matrix using a temperature
/// parameter. Lower temperatures favour the most likely squares.
pub fn sample_pdf<R: Rng + ?Sized>(
    pdf: &[[f64; GRID_SIZE]; GRID_SIZE],
    temperature: f64,
    rng: &mut R,
) -> Option<(usize, usize)> {
    let mut adjusted = [[0.0f64; GRID_SIZE]; GRID_SIZE];
    let mut total = 0.0;
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            let v = libm::pow(pdf[r][c], 1.0 / temperature);
            adjusted[r][c] = v;
            total += v;
        }
    }
    if total == 0.0 {
        return None;
    }
    let threshold: f64 = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last = None;
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            if adjusted[r][c] > 0.0 {
                cumulative += adjusted[r][c];
                last = Some((r, c));
                if threshold < cumulative {
                    return last;
                }
            }
        }
    }
    last
}

/// Pick the next Battleship target from the attacker's log.
pub fn choose_attack<R: Rng + ?Sized>(
    log: &Grid<Shot>,
    afloat: &[ShipKind],
    rng: &mut R,
) -> Option<(usize, usize)> {
    let pdf = calc_pdf(log, afloat);
    sample_pdf(&pdf, 0.5, rng)
}

/// Pick a Dots-and-Boxes line: close a box when possible, otherwise avoid
/// handing the opponent a third edge, otherwise anything open.
pub fn choose_line<R: Rng + ?Sized>(state: &DotsState, rng: &mut R) -> Option<DotsMove> {
    let open = state.open_lines();
    let edges_after = |line: &LineKey| -> Vec<usize> {
        state
            .adjacent_boxes(*line)
            .into_iter()
            .map(|b| state.claimed_edges(b) + 1)
            .collect()
    };

    let closing: Vec<LineKey> = open
        .iter()
        .copied()
        .filter(|l| edges_after(l).contains(&4))
        .collect();
    let safe: Vec<LineKey> = open
        .iter()
        .copied()
        .filter(|l| !edges_after(l).contains(&3))
        .collect();

    let pool = if !closing.is_empty() {
        closing
    } else if !safe.is_empty() {
        safe
    } else {
        open
    };
    pool.choose(rng).map(|l| DotsMove {
        row: l.row,
        col: l.col,
        kind: l.kind,
    })
}
