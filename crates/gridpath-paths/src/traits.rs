use gridpath_core::{Cell, Cost};

use crate::distance;

/// Estimate of the remaining cost from a cell to the goal.
///
/// The engine adds this to a cell's tentative distance to order the frontier;
/// distances themselves never include it. For the returned path to be optimal
/// the estimate must be admissible (never above the true remaining cost) and
/// consistent (`h(a) <= step(a, b) + h(b)` for adjacent `a`, `b`).
pub trait Heuristic {
    /// Estimated cost from `from` to `goal`.
    fn estimate(&self, from: Cell, goal: Cell) -> Cost;
}

/// No estimate at all: the engine runs plain Dijkstra.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Zero;

impl Heuristic for Zero {
    #[inline]
    fn estimate(&self, _from: Cell, _goal: Cell) -> Cost {
        0.0
    }
}

/// Octile distance, exact on an obstacle-free 8-connected grid. This is the
/// guided (A*) default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Octile;

impl Heuristic for Octile {
    #[inline]
    fn estimate(&self, from: Cell, goal: Cell) -> Cost {
        distance::octile(from, goal)
    }
}

impl<F> Heuristic for F
where
    F: Fn(Cell, Cell) -> Cost,
{
    #[inline]
    fn estimate(&self, from: Cell, goal: Cell) -> Cost {
        self(from, goal)
    }
}
