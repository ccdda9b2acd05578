use gridpath_core::{Cell, Cost, Grid};

/// A cell with the cost at which a search reached it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub cell: Cell,
    pub cost: Cost,
}

/// Per-run bookkeeping: tentative distances, the visited set and the
/// predecessor map.
///
/// Storage is flat and row-major, sized to the grid the state was created
/// for. Queries for cells outside that rectangle answer as if the cell was
/// never touched; writes to them are ignored.
#[derive(Debug, Clone)]
pub struct SearchState {
    width: i32,
    height: i32,
    distance: Vec<Cost>,
    visited: Vec<bool>,
    predecessor: Vec<Option<Cell>>,
    order: Vec<Cell>,
}

impl SearchState {
    /// Fresh state for `grid`: every distance `+∞`, nothing visited.
    pub fn new(grid: &Grid) -> Self {
        let len = grid.len();
        Self {
            width: grid.width(),
            height: grid.height(),
            distance: vec![Cost::INFINITY; len],
            visited: vec![false; len],
            predecessor: vec![None; len],
            order: Vec::new(),
        }
    }

    /// Return to the fresh state, keeping allocations.
    pub fn reset(&mut self) {
        self.distance.fill(Cost::INFINITY);
        self.visited.fill(false);
        self.predecessor.fill(None);
        self.order.clear();
    }

    #[inline]
    fn idx(&self, c: Cell) -> Option<usize> {
        if c.row < 0 || c.row >= self.height || c.col < 0 || c.col >= self.width {
            return None;
        }
        Some(c.row as usize * self.width as usize + c.col as usize)
    }

    /// Number of cells covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.distance.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }

    /// Best known distance to `c`, `+∞` if never relaxed.
    #[inline]
    pub fn distance_of(&self, c: Cell) -> Cost {
        self.idx(c).map_or(Cost::INFINITY, |i| self.distance[i])
    }

    /// Overwrite the distance of `c`. The caller has already checked that
    /// `cost` improves on [`distance_of`](Self::distance_of).
    #[inline]
    pub fn relax(&mut self, c: Cell, cost: Cost) {
        debug_assert!(cost < self.distance_of(c), "relax must improve {c}");
        if let Some(i) = self.idx(c) {
            self.distance[i] = cost;
        }
    }

    /// Finalise `c`. Visiting twice is a no-op.
    #[inline]
    pub fn mark_visited(&mut self, c: Cell) {
        if let Some(i) = self.idx(c) {
            if !self.visited[i] {
                self.visited[i] = true;
                self.order.push(c);
            }
        }
    }

    #[inline]
    pub fn is_visited(&self, c: Cell) -> bool {
        self.idx(c).is_some_and(|i| self.visited[i])
    }

    #[inline]
    pub fn set_predecessor(&mut self, c: Cell, from: Cell) {
        if let Some(i) = self.idx(c) {
            self.predecessor[i] = Some(from);
        }
    }

    #[inline]
    pub fn predecessor_of(&self, c: Cell) -> Option<Cell> {
        self.idx(c).and_then(|i| self.predecessor[i])
    }

    /// Visited cells, in the order they were finalised.
    pub fn visit_order(&self) -> &[Cell] {
        &self.order
    }

    /// Number of visited cells.
    pub fn visited_count(&self) -> usize {
        self.order.len()
    }

    /// Every cell with a finite distance, in row-major order. Cells that were
    /// relaxed but not yet visited carry their tentative distance.
    pub fn reached(&self) -> impl Iterator<Item = PathNode> + '_ {
        let w = self.width as usize;
        self.distance
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_finite())
            .map(move |(i, &cost)| PathNode {
                cell: Cell::new((i / w) as i32, (i % w) as i32),
                cost,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SearchState {
        SearchState::new(&Grid::new(4, 3).unwrap())
    }

    #[test]
    fn fresh_state_is_untouched() {
        let s = state();
        assert_eq!(s.len(), 12);
        for row in 0..3 {
            for col in 0..4 {
                let c = Cell::new(row, col);
                assert_eq!(s.distance_of(c), Cost::INFINITY);
                assert!(!s.is_visited(c));
                assert_eq!(s.predecessor_of(c), None);
            }
        }
        assert_eq!(s.reached().count(), 0);
    }

    #[test]
    fn relax_visit_and_predecessor() {
        let mut s = state();
        let a = Cell::new(0, 0);
        let b = Cell::new(1, 1);
        s.relax(a, 0.0);
        s.relax(b, 5.0);
        s.relax(b, std::f64::consts::SQRT_2);
        s.set_predecessor(b, a);
        s.mark_visited(a);
        s.mark_visited(b);
        s.mark_visited(a);

        assert_eq!(s.distance_of(b), std::f64::consts::SQRT_2);
        assert!(s.is_visited(a) && s.is_visited(b));
        assert_eq!(s.predecessor_of(b), Some(a));
        assert_eq!(s.predecessor_of(a), None);
        assert_eq!(s.visit_order(), &[a, b]);
        assert_eq!(s.visited_count(), 2);

        let reached: Vec<_> = s.reached().map(|n| n.cell).collect();
        assert_eq!(reached, vec![a, b]);
    }

    #[test]
    fn out_of_bounds_is_inert() {
        let mut s = state();
        let out = Cell::new(-1, 2);
        s.mark_visited(out);
        s.set_predecessor(out, Cell::ZERO);
        assert!(!s.is_visited(out));
        assert_eq!(s.predecessor_of(out), None);
        assert_eq!(s.distance_of(Cell::new(3, 0)), Cost::INFINITY);
        assert_eq!(s.visited_count(), 0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut s = state();
        let c = Cell::new(2, 3);
        s.relax(c, 1.0);
        s.mark_visited(c);
        s.set_predecessor(c, Cell::new(2, 2));
        s.reset();
        assert_eq!(s.distance_of(c), Cost::INFINITY);
        assert!(!s.is_visited(c));
        assert_eq!(s.predecessor_of(c), None);
        assert!(s.visit_order().is_empty());
    }
}
