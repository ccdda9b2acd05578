//! Paths and their reconstruction from a predecessor map.

use gridpath_core::{Cell, Cost, step_cost};

use crate::error::Unreachable;
use crate::state::SearchState;

/// An ordered sequence of cells from start to goal, both included.
///
/// An empty path means the goal was not reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    /// Wrap an already ordered cell sequence.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// The cells, start first.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells (not steps).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// Sum of the step costs between consecutive cells.
    pub fn cost(&self) -> Cost {
        self.cells
            .windows(2)
            .map(|w| step_cost(w[0], w[1]))
            .sum()
    }

    /// The path without its endpoints, for highlighting between markers.
    /// Paths of fewer than three cells have no interior.
    pub fn interior(&self) -> &[Cell] {
        if self.cells.len() < 3 {
            return &[];
        }
        &self.cells[1..self.cells.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    pub fn into_vec(self) -> Vec<Cell> {
        self.cells
    }
}

impl IntoIterator for Path {
    type Item = Cell;
    type IntoIter = std::vec::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl From<Vec<Cell>> for Path {
    fn from(cells: Vec<Cell>) -> Self {
        Self::new(cells)
    }
}

/// Walk the predecessor map back from `goal` to `start`.
///
/// `start == goal` yields `[start]` without looking at the map. Otherwise
/// every cell on the way back must have a predecessor until `start` is met;
/// a gap means the goal was never reached from `start`.
pub fn trace(start: Cell, goal: Cell, state: &SearchState) -> Result<Path, Unreachable> {
    if start == goal {
        return Ok(Path::new(vec![start]));
    }

    let mut cells = vec![goal];
    let mut current = goal;
    while current != start {
        // A predecessor chain visits each cell at most once.
        if cells.len() > state.len() {
            return Err(Unreachable { start, goal });
        }
        let Some(prev) = state.predecessor_of(current) else {
            return Err(Unreachable { start, goal });
        };
        cells.push(prev);
        current = prev;
    }
    cells.reverse();
    Ok(Path::new(cells))
}
