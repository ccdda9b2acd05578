//! Shared scene model for the terminal pathfinder demo.
//!
//! Demonstrates: parsing a map, running Dijkstra or A*, and laying the
//! explored set and the resulting path over the grid for display.

use std::fmt;

use clap::ValueEnum;
use gridpath_core::{Cell, Cost, Grid, MalformedGridError};
use gridpath_paths::{
    DiagonalMoves, Heuristic, InvalidEndpointError, Path, PathfindingEngine, SearchOutcome,
    SearchStats,
};

/// The 20×20 maze the demo opens with when no `--map` is given.
pub const SAMPLE: [[u8; 20]; 20] = [
    [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0],
    [0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1, 1],
    [0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0],
    [0, 0, 0, 0, 1, 0, 1, 1, 1, 0, 1, 1, 1, 1, 0, 0, 0, 0, 1, 0],
    [0, 0, 0, 1, 1, 0, 1, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0],
    [1, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0],
    [0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0],
    [0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 1, 1, 1, 1],
    [0, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0],
    [0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
    [0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 0, 1, 0, 0],
    [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0],
    [1, 1, 0, 0, 1, 1, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 1, 0, 0, 0],
    [0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0],
    [0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1],
    [0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0],
];

/// Build the [`SAMPLE`] maze.
pub fn sample_grid() -> Result<Grid, MalformedGridError> {
    Grid::from_rows(SAMPLE)
}

// ---------------------------------------------------------------------------
// Colours
// ---------------------------------------------------------------------------

/// A 24-bit colour, converted to the terminal's colour type by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const COL_WALL: Rgb = Rgb::new(128, 128, 128);
pub const COL_FLOOR: Rgb = Rgb::new(255, 255, 255);
pub const COL_START: Rgb = Rgb::new(255, 0, 0);
pub const COL_GOAL: Rgb = Rgb::new(0, 255, 0);
pub const COL_PATH: Rgb = Rgb::new(255, 165, 0);
pub const COL_EXPLORED: Rgb = Rgb::new(135, 206, 250);

// ---------------------------------------------------------------------------
// Algorithm selection
// ---------------------------------------------------------------------------

/// Which search the demo runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Algorithm {
    /// Unguided label-setting search
    #[default]
    Dijkstra,
    /// Octile-guided search
    #[value(alias = "a*")]
    Astar,
}

/// `env_logger` filter used when `RUST_LOG` is unset.
pub fn log_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Parse a `ROW,COL` pair.
pub fn parse_cell(s: &str) -> Result<Cell, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let row = row
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad row {:?}: {e}", row.trim()))?;
    let col = col
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad column {:?}: {e}", col.trim()))?;
    Ok(Cell::new(row, col))
}

// ---------------------------------------------------------------------------
// Solving
// ---------------------------------------------------------------------------

/// Everything the demo shows about one search.
#[derive(Debug, Clone)]
pub struct Solution {
    pub outcome: SearchOutcome,
    pub path: Path,
    /// Path cost, `None` when the goal was not reached.
    pub cost: Option<Cost>,
    /// Cells in the order the search finalised them.
    pub explored: Vec<Cell>,
    pub stats: SearchStats,
}

/// Run `algorithm` from `start` to `goal`.
pub fn solve(
    grid: &Grid,
    start: Cell,
    goal: Cell,
    algorithm: Algorithm,
    diagonals: DiagonalMoves,
) -> Result<Solution, InvalidEndpointError> {
    match algorithm {
        Algorithm::Dijkstra => run(
            PathfindingEngine::new(grid).with_diagonals(diagonals),
            start,
            goal,
        ),
        Algorithm::Astar => run(
            PathfindingEngine::guided(grid).with_diagonals(diagonals),
            start,
            goal,
        ),
    }
}

fn run<H: Heuristic>(
    mut engine: PathfindingEngine<'_, H>,
    start: Cell,
    goal: Cell,
) -> Result<Solution, InvalidEndpointError> {
    let outcome = engine.find(start, goal)?;
    let path = engine.trace(start, goal);
    let cost = outcome.is_found().then(|| path.cost());
    let stats = engine.stats();
    log::info!(
        "{outcome:?} after {} expansions ({} stale pops, frontier peak {})",
        stats.expansions,
        stats.stale_pops,
        stats.frontier_high_water
    );
    Ok(Solution {
        outcome,
        path,
        cost,
        explored: engine.expanded().to_vec(),
        stats,
    })
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// What a single cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
    Explored,
    Path,
    Start,
    Goal,
}

impl Tile {
    pub fn color(self) -> Rgb {
        match self {
            Self::Wall => COL_WALL,
            Self::Floor => COL_FLOOR,
            Self::Explored => COL_EXPLORED,
            Self::Path => COL_PATH,
            Self::Start => COL_START,
            Self::Goal => COL_GOAL,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Floor => '.',
            Self::Explored => ':',
            Self::Path => '*',
            Self::Start => 'S',
            Self::Goal => 'G',
        }
    }

    /// Overlays may only repaint open floor.
    fn is_paintable(self) -> bool {
        matches!(self, Self::Floor | Self::Explored)
    }
}

/// A grid of [`Tile`]s ready to paint.
///
/// Start and goal are placed first and never repainted; the explored set and
/// the path only cover open floor, so walls and endpoints always stay
/// visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Scene {
    pub fn new(grid: &Grid, start: Cell, goal: Cell) -> Self {
        let mut scene = Self {
            width: grid.width(),
            height: grid.height(),
            tiles: grid
                .cells()
                .map(|(_, state)| {
                    if state.is_blocked() {
                        Tile::Wall
                    } else {
                        Tile::Floor
                    }
                })
                .collect(),
        };
        scene.set(start, Tile::Start);
        scene.set(goal, Tile::Goal);
        scene
    }

    /// Shade every finalised cell.
    pub fn with_explored(mut self, cells: &[Cell]) -> Self {
        for &c in cells {
            self.paint(c, Tile::Explored);
        }
        self
    }

    /// Highlight the path between its endpoints.
    pub fn with_path(mut self, path: &Path) -> Self {
        for &c in path.interior() {
            self.paint(c, Tile::Path);
        }
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        self.idx(cell).map(|i| self.tiles[i])
    }

    /// Tiles row by row, top first.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.tiles.chunks(self.width.max(1) as usize)
    }

    fn idx(&self, c: Cell) -> Option<usize> {
        if c.row < 0 || c.row >= self.height || c.col < 0 || c.col >= self.width {
            return None;
        }
        Some(c.row as usize * self.width as usize + c.col as usize)
    }

    fn set(&mut self, c: Cell, tile: Tile) {
        if let Some(i) = self.idx(c) {
            self.tiles[i] = tile;
        }
    }

    fn paint(&mut self, c: Cell, tile: Tile) {
        if let Some(i) = self.idx(c) {
            if self.tiles[i].is_paintable() {
                self.tiles[i] = tile;
            }
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{}", tile.glyph())?;
            }
        }
        Ok(())
    }
}
