//! The occupancy [`Grid`]: a rectangle of free and blocked cells.
//!
//! A grid is built once from external input and is read-only afterwards, so a
//! single grid can back any number of searches (including concurrent ones on
//! other threads). Start and goal markers are never stored in the grid; text
//! literals that contain them hand them back separately through
//! [`Grid::parse_with_endpoints`].

use std::fmt;
use std::str::FromStr;

use crate::geom::Cell;

/// Occupancy of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Free,
    Blocked,
}

impl CellState {
    /// Whether the cell cannot be entered.
    #[inline]
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }

    /// Numeric form used by [`Grid::from_rows`]: 0 = free, 1 = blocked.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Blocked => 1,
        }
    }
}

/// A grid literal together with the `S`/`G` markers found in it.
#[derive(Debug, Clone)]
pub struct ParsedGrid {
    pub grid: Grid,
    pub start: Option<Cell>,
    pub goal: Option<Cell>,
}

/// A rectangular occupancy grid, `width × height`, both at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellState>,
    width: i32,
    height: i32,
}

impl Grid {
    /// Create an obstacle-free grid. Dimensions below 1 are rejected.
    pub fn new(width: i32, height: i32) -> Result<Self, MalformedGridError> {
        if width < 1 || height < 1 {
            return Err(MalformedGridError::Empty);
        }
        Ok(Self {
            cells: vec![CellState::Free; (width as usize) * (height as usize)],
            width,
            height,
        })
    }

    /// Build a grid from numeric rows, 0 = free and 1 = blocked.
    ///
    /// Every row must have the same, non-zero length. Nothing is constructed
    /// unless the whole input is valid.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, MalformedGridError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let mut cells = Vec::new();
        let mut width: Option<usize> = None;
        let mut height = 0usize;

        for (row, values) in rows.into_iter().enumerate() {
            let values = values.as_ref();
            match width {
                None if values.is_empty() => return Err(MalformedGridError::EmptyRow { row }),
                None => width = Some(values.len()),
                Some(w) if w != values.len() => {
                    return Err(MalformedGridError::Ragged {
                        row,
                        expected: w,
                        found: values.len(),
                    });
                }
                Some(_) => {}
            }
            for (col, &value) in values.iter().enumerate() {
                let state = match value {
                    0 => CellState::Free,
                    1 => CellState::Blocked,
                    _ => return Err(MalformedGridError::InvalidCell { row, col, value }),
                };
                cells.push(state);
            }
            height += 1;
        }

        let Some(width) = width else {
            return Err(MalformedGridError::Empty);
        };
        Ok(Self {
            cells,
            width: width as i32,
            height: height as i32,
        })
    }

    /// Parse a text literal: `.` is free, `#` is blocked.
    ///
    /// `S` and `G` are accepted as free cells; use
    /// [`parse_with_endpoints`](Self::parse_with_endpoints) to recover their
    /// positions. Leading/trailing whitespace around the whole literal is
    /// trimmed but not around individual lines.
    pub fn parse(s: &str) -> Result<Self, MalformedGridError> {
        Self::parse_with_endpoints(s).map(|p| p.grid)
    }

    /// Parse a text literal and report where `S` (start) and `G` (goal) were.
    pub fn parse_with_endpoints(s: &str) -> Result<ParsedGrid, MalformedGridError> {
        let s = s.trim();
        let mut rows: Vec<Vec<u8>> = Vec::new();
        let mut start = None;
        let mut goal = None;

        for (row, line) in s.lines().enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let mut values = Vec::with_capacity(line.len());
            for (col, ch) in line.chars().enumerate() {
                let here = Cell::new(row as i32, col as i32);
                let value = match ch {
                    '.' => 0,
                    '#' => 1,
                    'S' | 'G' => {
                        let slot = if ch == 'S' { &mut start } else { &mut goal };
                        if slot.is_some() {
                            return Err(MalformedGridError::DuplicateMarker { ch, row, col });
                        }
                        *slot = Some(here);
                        0
                    }
                    _ => return Err(MalformedGridError::InvalidChar { ch, row, col }),
                };
                values.push(value);
            }
            rows.push(values);
        }

        let grid = Self::from_rows(rows)?;
        Ok(ParsedGrid { grid, start, goal })
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `cell` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.row < self.height && cell.col >= 0 && cell.col < self.width
    }

    /// Whether `cell` is blocked. Out-of-bounds cells count as blocked.
    #[inline]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.at(cell).is_none_or(CellState::is_blocked)
    }

    /// Whether `cell` is inside the grid and free.
    #[inline]
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.at(cell).is_some_and(|s| !s.is_blocked())
    }

    /// The state of `cell`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, cell: Cell) -> Option<CellState> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// Row-major flat index of `cell`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(cell.row as usize * self.width as usize + cell.col as usize)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn cell_at(&self, index: usize) -> Cell {
        let w = self.width as usize;
        Cell::new((index / w) as i32, (index % w) as i32)
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &s)| (self.cell_at(i), s))
    }

    /// Iterate over the free cells in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells()
            .filter(|(_, s)| !s.is_blocked())
            .map(|(c, _)| c)
    }

    /// Export as numeric rows (0 = free, 1 = blocked), the inverse of
    /// [`from_rows`](Self::from_rows).
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|s| s.as_u8()).collect())
            .collect()
    }
}

impl FromStr for Grid {
    type Err = MalformedGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.width as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for s in row {
                f.write_str(if s.is_blocked() { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Grid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<u8>>::deserialize(deserializer)?;
        Grid::from_rows(rows).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Input that cannot form a rectangular grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedGridError {
    /// No rows at all, or a non-positive dimension.
    Empty,
    /// The first row has no cells.
    EmptyRow { row: usize },
    /// A row whose length differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A numeric cell other than 0 or 1.
    InvalidCell { row: usize, col: usize, value: u8 },
    /// A character outside `.#SG` in a text literal.
    InvalidChar { ch: char, row: usize, col: usize },
    /// A second `S` or `G` marker in a text literal.
    DuplicateMarker { ch: char, row: usize, col: usize },
}

impl fmt::Display for MalformedGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: no cells"),
            Self::EmptyRow { row } => write!(f, "grid: row {row} is empty"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidCell { row, col, value } => {
                write!(f, "grid: invalid cell value {value} at ({row}, {col})")
            }
            Self::InvalidChar { ch, row, col } => {
                write!(f, "grid: invalid character {ch:?} at ({row}, {col})")
            }
            Self::DuplicateMarker { ch, row, col } => {
                write!(f, "grid: duplicate marker {ch:?} at ({row}, {col})")
            }
        }
    }
}

impl std::error::Error for MalformedGridError {}
