//! Min-priority frontier with lazy deletion.
//!
//! There is no decrease-key: an improved cell is pushed again and the older,
//! worse entry stays in the heap until it is popped, at which point the
//! engine sees the cell is already visited and discards it. Equal
//! priorities pop in insertion order so a search is reproducible.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridpath_core::{Cell, Cost};

/// Total order over costs, so they can key a `BinaryHeap`.
#[derive(Copy, Clone, Debug, Default)]
struct Priority(Cost);

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct FrontierEntry {
    priority: Priority,
    seq: u64,
    cell: Cell,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse both keys so the max-heap pops the lowest priority first
        // and, among equals, the earliest push.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of `(priority, cell)` entries; duplicates allowed.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
    high_water: usize,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. O(log n); never fails, never replaces.
    pub fn push(&mut self, priority: Cost, cell: Cell) {
        self.heap.push(FrontierEntry {
            priority: Priority(priority),
            seq: self.next_seq,
            cell,
        });
        self.next_seq += 1;
        self.high_water = self.high_water.max(self.heap.len());
    }

    /// Remove and return the lowest-priority entry.
    pub fn pop_min(&mut self) -> Option<(Cost, Cell)> {
        self.heap.pop().map(|e| (e.priority.0, e.cell))
    }

    /// Number of queued entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the frontier reached since creation or the last
    /// [`clear`](Self::clear).
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Drop all entries and restart the insertion sequence.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
        self.high_water = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_priority_order() {
        let mut f = Frontier::new();
        f.push(3.0, Cell::new(0, 3));
        f.push(1.0, Cell::new(0, 1));
        f.push(2.5, Cell::new(0, 2));
        assert_eq!(f.pop_min(), Some((1.0, Cell::new(0, 1))));
        assert_eq!(f.pop_min(), Some((2.5, Cell::new(0, 2))));
        assert_eq!(f.pop_min(), Some((3.0, Cell::new(0, 3))));
        assert_eq!(f.pop_min(), None);
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut f = Frontier::new();
        let cells = [Cell::new(5, 5), Cell::new(0, 0), Cell::new(3, 1), Cell::new(1, 3)];
        for c in cells {
            f.push(1.0, c);
        }
        let popped: Vec<_> = std::iter::from_fn(|| f.pop_min()).map(|(_, c)| c).collect();
        assert_eq!(popped, cells);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut f = Frontier::new();
        let c = Cell::new(2, 2);
        f.push(4.0, c);
        f.push(2.0, c);
        assert_eq!(f.len(), 2);
        assert_eq!(f.pop_min(), Some((2.0, c)));
        // The stale entry is still there for the caller to discard.
        assert_eq!(f.pop_min(), Some((4.0, c)));
        assert!(f.is_empty());
    }

    #[test]
    fn high_water_tracks_peak() {
        let mut f = Frontier::new();
        f.push(1.0, Cell::new(0, 0));
        f.push(2.0, Cell::new(0, 1));
        f.pop_min();
        f.push(3.0, Cell::new(0, 2));
        assert_eq!(f.high_water(), 2);
        f.clear();
        assert_eq!(f.high_water(), 0);
        assert!(f.is_empty());
    }

    #[test]
    fn sqrt2_sums_order_correctly() {
        let mut f = Frontier::new();
        let d = std::f64::consts::SQRT_2;
        f.push(d + d, Cell::new(2, 2));
        f.push(3.0, Cell::new(0, 3));
        f.push(1.0 + d, Cell::new(1, 2));
        assert_eq!(f.pop_min().map(|(_, c)| c), Some(Cell::new(1, 2)));
        assert_eq!(f.pop_min().map(|(_, c)| c), Some(Cell::new(2, 2)));
        assert_eq!(f.pop_min().map(|(_, c)| c), Some(Cell::new(0, 3)));
    }
}
