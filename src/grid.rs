//! A square grid of optional cells shared by the board games.
//!
//! The grid is `no_std` friendly. Cells are stored row-major in a single
//! vector; an absent value means the cell is empty. Every accessor checks
//! bounds and returns an error rather than panicking, so callers can reject
//! bad coordinates before they touch any state.

use alloc::vec::Vec;
use core::fmt;

/// Errors returned by grid operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    /// Row or column index is out of bounds [0..size).
    OutOfBounds { row: usize, col: usize, size: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { row, col, size } => {
                write!(f, "OutOfBounds: row={}, col={} on a {}x{} grid", row, col, size, size)
            }
        }
    }
}

/// Returns `true` when `(row, col)` addresses a cell of an `n`×`n` grid.
#[inline]
pub fn is_valid_coord(n: usize, row: usize, col: usize) -> bool {
    row < n && col < n
}

/// Create an `n`×`n` grid with every cell empty.
pub fn create_empty_grid<T: Clone>(n: usize) -> Grid<T> {
    Grid::new(n)
}

/// An N×N grid of optional values.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    size: usize,
    cells: Vec<Option<T>>,
}

impl<T: Clone> Grid<T> {
    /// Create an empty grid of `size`×`size` cells.
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: alloc::vec![None; size * size],
        }
    }

    /// Creates a grid holding `value` at each of the given positions.
    pub fn from_iter<I>(size: usize, iter: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = ((usize, usize), T)>,
    {
        let mut grid = Self::new(size);
        for ((r, c), value) in iter {
            grid.set(r, c, value)?;
        }
        Ok(grid)
    }
}

impl<T> Grid<T> {
    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` when `(row, col)` lies on the grid.
    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        is_valid_coord(self.size, row, col)
    }

    /// Row-major index of `(row, col)`.
    pub fn index_of(&self, row: usize, col: usize) -> Result<usize, GridError> {
        self.check_bounds(row, col)?;
        Ok(row * self.size + col)
    }

    /// Coordinate of a row-major index.
    pub fn coord_of(&self, index: usize) -> Result<(usize, usize), GridError> {
        let (row, col) = (index / self.size.max(1), index % self.size.max(1));
        self.check_bounds(row, col)?;
        Ok((row, col))
    }

    /// Gets the value at (row, col), `None` when the cell is empty.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<&T>, GridError> {
        let idx = self.index_of(row, col)?;
        Ok(self.cells[idx].as_ref())
    }

    /// Returns `true` if the cell at (row, col) holds no value.
    pub fn is_empty_at(&self, row: usize, col: usize) -> Result<bool, GridError> {
        Ok(self.get(row, col)?.is_none())
    }

    /// Stores `value` at (row, col), replacing whatever was there.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), GridError> {
        let idx = self.index_of(row, col)?;
        self.cells[idx] = Some(value);
        Ok(())
    }

    /// Empties the cell at (row, col), returning the previous value.
    pub fn take(&mut self, row: usize, col: usize) -> Result<Option<T>, GridError> {
        let idx = self.index_of(row, col)?;
        Ok(self.cells[idx].take())
    }

    /// Number of occupied cells.
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterator over occupied cells as `((row, col), &value)`.
    pub fn iter_occupied(&self) -> impl Iterator<Item = ((usize, usize), &T)> + '_ {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| cell.as_ref().map(|v| ((idx / n, idx % n), v)))
    }

    #[inline]
    fn check_bounds(&self, row: usize, col: usize) -> Result<(), GridError> {
        if self.in_bounds(row, col) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                row,
                col,
                size: self.size,
            })
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid<{}x{}>:", self.size, self.size)?;
        for r in 0..self.size {
            for c in 0..self.size {
                match &self.cells[r * self.size + c] {
                    Some(v) => write!(f, "{:?} ", v)?,
                    None => write!(f, "· ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
