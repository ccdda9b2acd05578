//! Geometry primitives: [`Cell`] coordinates and step costs.
//!
//! Cells are addressed as `(row, col)` with rows growing downwards, matching
//! the row-major layout of [`Grid`](crate::Grid).

use std::fmt;
use std::ops::{Add, Sub};

/// Accumulated path cost. `f64::INFINITY` marks "not reached".
pub type Cost = f64;

/// Cost of a horizontal or vertical step.
pub const CARDINAL_COST: Cost = 1.0;

/// Cost of a diagonal step.
pub const DIAGONAL_COST: Cost = std::f64::consts::SQRT_2;

/// The eight unit moves in the order the search expands them: north, then
/// clockwise.
pub const MOVES: [Cell; 8] = [
    Cell::new(-1, 0),
    Cell::new(-1, 1),
    Cell::new(0, 1),
    Cell::new(1, 1),
    Cell::new(1, 0),
    Cell::new(1, -1),
    Cell::new(0, -1),
    Cell::new(-1, -1),
];

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A grid coordinate. Also used as a row/column delta.
///
/// Cells are plain values; they never borrow from a grid, so an out-of-bounds
/// cell is representable and is rejected by the grid queries instead.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a cell shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// All eight neighbours, in [`MOVES`] order. Some may be out of bounds.
    #[inline]
    pub fn neighbors_8(self) -> [Cell; 8] {
        MOVES.map(|d| self + d)
    }

    /// Whether `other` is one king-move away.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        let d = other - self;
        d != Cell::ZERO && d.row.abs() <= 1 && d.col.abs() <= 1
    }

    /// Whether the step from `self` to `other` changes both row and column.
    #[inline]
    pub fn is_diagonal_step(self, other: Cell) -> bool {
        self.row != other.row && self.col != other.col
    }
}

/// Cost of moving between two adjacent cells: √2 for a diagonal step, 1
/// otherwise.
#[inline]
pub fn step_cost(from: Cell, to: Cell) -> Cost {
    if from.is_diagonal_step(to) {
        DIAGONAL_COST
    } else {
        CARDINAL_COST
    }
}

// --- trait impls for Cell ---

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl From<Cell> for (i32, i32) {
    #[inline]
    fn from(c: Cell) -> Self {
        (c.row, c.col)
    }
}

impl Add for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Cell {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn cell_round_trip() {
        let c = Cell::new(4, 9);
        let json = serde_json::to_string(&c).unwrap();
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
