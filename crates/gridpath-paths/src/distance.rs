use gridpath_core::{Cell, Cost, DIAGONAL_COST};

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

/// Chebyshev (L∞) distance between two cells.
#[inline]
pub fn chebyshev(a: Cell, b: Cell) -> i32 {
    (a.row - b.row).abs().max((a.col - b.col).abs())
}

/// Octile distance: the exact cost of an unobstructed 8-connected path.
///
/// `max(|Δr|, |Δc|) + (√2 − 1) · min(|Δr|, |Δc|)`
#[inline]
pub fn octile(a: Cell, b: Cell) -> Cost {
    let dr = (a.row - b.row).abs();
    let dc = (a.col - b.col).abs();
    let (lo, hi) = if dr < dc { (dr, dc) } else { (dc, dr) };
    hi as Cost + (DIAGONAL_COST - 1.0) * lo as Cost
}

/// Straight-line (L2) distance between two cells.
#[inline]
pub fn euclidean(a: Cell, b: Cell) -> Cost {
    let dr = (a.row - b.row) as Cost;
    let dc = (a.col - b.col) as Cost;
    dr.hypot(dc)
}
