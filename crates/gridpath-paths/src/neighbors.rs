use gridpath_core::{Cell, Grid, MOVES};

/// Which diagonal steps are legal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagonalMoves {
    /// A diagonal step needs both cells it squeezes between to be free, so
    /// paths never clip the corner of a wall.
    #[default]
    Strict,
    /// Any diagonal step into a free cell is allowed, even between two walls.
    CutCorners,
}

impl DiagonalMoves {
    /// Whether the step `from -> to` between adjacent cells is allowed on
    /// `grid`. Only the corner rule is checked here, not `to` itself.
    #[inline]
    pub fn permits(self, grid: &Grid, from: Cell, to: Cell) -> bool {
        match self {
            Self::CutCorners => true,
            Self::Strict => {
                !from.is_diagonal_step(to)
                    || (grid.is_passable(Cell::new(from.row, to.col))
                        && grid.is_passable(Cell::new(to.row, from.col)))
            }
        }
    }
}

/// Cached neighbour computation helper.
///
/// Enumerates the eight neighbours of a cell in [`MOVES`] order (north, then
/// clockwise), keeping only those accepted by a predicate. The buffer is
/// reused across calls so the search loop does not allocate per expansion.
#[derive(Debug, Clone)]
pub struct Neighbors {
    buf: Vec<Cell>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the 8-directional neighbours of `c` for which `keep` returns
    /// `true`.
    pub fn all(&mut self, c: Cell, keep: impl Fn(Cell) -> bool) -> &[Cell] {
        self.buf.clear();
        for d in MOVES {
            let n = c + d;
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }

    /// Neighbours of `c` that a search may step into on `grid`.
    pub fn passable(&mut self, grid: &Grid, c: Cell, diagonals: DiagonalMoves) -> &[Cell] {
        self.all(c, |n| grid.is_passable(n) && diagonals.permits(grid, c, n))
    }
}
