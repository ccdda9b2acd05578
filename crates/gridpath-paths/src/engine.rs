//! The label-setting search loop.
//!
//! [`PathfindingEngine`] runs Dijkstra over the 8-connected lattice of a
//! [`Grid`]. Plugging in a [`Heuristic`] turns the same loop into A*: the
//! heuristic only shifts frontier priorities, while distances, relaxation and
//! predecessors stay exactly as in the unguided search.
//!
//! A run moves through `Idle → Running → {Found, Exhausted}`. [`find`]
//! drives it to the end in one call; [`begin`] plus repeated [`step`] drive
//! it one frontier pop at a time, which is what a visualiser wants.
//!
//! [`find`]: PathfindingEngine::find
//! [`begin`]: PathfindingEngine::begin
//! [`step`]: PathfindingEngine::step

use gridpath_core::{Cell, Cost, Grid, step_cost};

use crate::error::{Endpoint, InvalidEndpointError, Unreachable};
use crate::frontier::Frontier;
use crate::neighbors::{DiagonalMoves, Neighbors};
use crate::path::{self, Path};
use crate::state::SearchState;
use crate::traits::{Heuristic, Octile, Zero};

/// Where the engine is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineStatus {
    /// No search in progress; the state holds nothing.
    Idle,
    /// Endpoints accepted, frontier not yet settled.
    Running,
    /// The goal was popped; its distance is final.
    Found,
    /// The frontier ran dry before the goal was popped.
    Exhausted,
}

/// How a completed search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    Found,
    Exhausted,
}

impl SearchOutcome {
    #[inline]
    pub fn is_found(self) -> bool {
        matches!(self, Self::Found)
    }
}

/// Result of a single [`PathfindingEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepOutcome {
    /// More work remains.
    Continue,
    Found,
    Exhausted,
}

impl From<SearchOutcome> for StepOutcome {
    fn from(o: SearchOutcome) -> Self {
        match o {
            SearchOutcome::Found => Self::Found,
            SearchOutcome::Exhausted => Self::Exhausted,
        }
    }
}

/// Counters for the current (or last) run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells finalised.
    pub expansions: usize,
    /// Frontier entries discarded because their cell was already visited.
    pub stale_pops: usize,
    /// Frontier insertions, the seed included.
    pub pushes: usize,
    /// Peak frontier size.
    pub frontier_high_water: usize,
}

/// Shortest-path engine over a borrowed, read-only [`Grid`].
///
/// Each call to [`find`](Self::find) or [`begin`](Self::begin) starts from a
/// fresh [`SearchState`] and [`Frontier`]; the state of the last run stays
/// available for inspection and for [`trace`](Self::trace) until the next
/// one. Engines are cheap; use one per thread when searching a shared grid
/// concurrently.
pub struct PathfindingEngine<'g, H = Zero> {
    grid: &'g Grid,
    heuristic: H,
    diagonals: DiagonalMoves,
    status: EngineStatus,
    start: Cell,
    goal: Cell,
    state: SearchState,
    frontier: Frontier,
    nbuf: Neighbors,
    stats: SearchStats,
}

impl<'g> PathfindingEngine<'g, Zero> {
    /// Unguided engine (Dijkstra).
    pub fn new(grid: &'g Grid) -> Self {
        Self::with_heuristic(grid, Zero)
    }
}

impl<'g> PathfindingEngine<'g, Octile> {
    /// Guided engine (A*) using the octile distance.
    pub fn guided(grid: &'g Grid) -> Self {
        Self::with_heuristic(grid, Octile)
    }
}

impl<'g, H: Heuristic> PathfindingEngine<'g, H> {
    /// Engine whose frontier is ordered by `distance + heuristic`.
    ///
    /// The result is only guaranteed optimal if `heuristic` is admissible
    /// and consistent for unit/√2 step costs.
    pub fn with_heuristic(grid: &'g Grid, heuristic: H) -> Self {
        Self {
            grid,
            heuristic,
            diagonals: DiagonalMoves::default(),
            status: EngineStatus::Idle,
            start: Cell::ZERO,
            goal: Cell::ZERO,
            state: SearchState::new(grid),
            frontier: Frontier::new(),
            nbuf: Neighbors::new(),
            stats: SearchStats::default(),
        }
    }

    /// Set the diagonal-step rule (default [`DiagonalMoves::Strict`]).
    pub fn with_diagonals(mut self, diagonals: DiagonalMoves) -> Self {
        self.diagonals = diagonals;
        self
    }

    /// Search from `start` to `goal` until the goal is settled or the
    /// frontier is empty.
    pub fn find(&mut self, start: Cell, goal: Cell) -> Result<SearchOutcome, InvalidEndpointError> {
        self.begin(start, goal)?;
        loop {
            match self.step() {
                StepOutcome::Continue => {}
                StepOutcome::Found => return Ok(SearchOutcome::Found),
                StepOutcome::Exhausted => return Ok(SearchOutcome::Exhausted),
            }
        }
    }

    /// Validate the endpoints and seed a new run without advancing it.
    ///
    /// Endpoints are checked before anything is written. On error the engine
    /// is left [`Idle`](EngineStatus::Idle) and the state of the previous run,
    /// if any, is kept as it was.
    pub fn begin(&mut self, start: Cell, goal: Cell) -> Result<(), InvalidEndpointError> {
        if let Err(err) = self
            .check_endpoint(Endpoint::Start, start)
            .and_then(|()| self.check_endpoint(Endpoint::Goal, goal))
        {
            self.status = EngineStatus::Idle;
            log::debug!("search rejected: {err}");
            return Err(err);
        }

        self.state.reset();
        self.frontier.clear();
        self.stats = SearchStats::default();
        self.start = start;
        self.goal = goal;
        self.state.relax(start, 0.0);
        self.push(0.0, start);
        self.status = EngineStatus::Running;
        log::debug!("search {start} -> {goal} started");
        Ok(())
    }

    fn check_endpoint(&self, endpoint: Endpoint, cell: Cell) -> Result<(), InvalidEndpointError> {
        if !self.grid.in_bounds(cell) {
            Err(InvalidEndpointError::OutOfBounds { endpoint, cell })
        } else if self.grid.is_blocked(cell) {
            Err(InvalidEndpointError::Blocked { endpoint, cell })
        } else {
            Ok(())
        }
    }

    /// Advance the run by one frontier pop.
    ///
    /// Once the run has ended this keeps returning its outcome without
    /// touching anything. An idle engine has an empty frontier and reports
    /// [`Exhausted`](StepOutcome::Exhausted).
    pub fn step(&mut self) -> StepOutcome {
        match self.status {
            EngineStatus::Running => {}
            EngineStatus::Found => return StepOutcome::Found,
            EngineStatus::Idle | EngineStatus::Exhausted => return StepOutcome::Exhausted,
        }

        let Some((_, cell)) = self.frontier.pop_min() else {
            return self.finish(SearchOutcome::Exhausted);
        };
        if self.state.is_visited(cell) {
            self.stats.stale_pops += 1;
            return StepOutcome::Continue;
        }
        self.state.mark_visited(cell);
        self.stats.expansions += 1;

        let current = self.state.distance_of(cell);
        log::trace!("expand {cell} at {current:.3}");
        if cell == self.goal {
            return self.finish(SearchOutcome::Found);
        }

        let neighbors = self.nbuf.passable(self.grid, cell, self.diagonals);
        for &n in neighbors {
            if self.state.is_visited(n) {
                continue;
            }
            let candidate = current + step_cost(cell, n);
            if candidate < self.state.distance_of(n) {
                self.state.relax(n, candidate);
                self.state.set_predecessor(n, cell);
                let priority = candidate + self.heuristic.estimate(n, self.goal);
                self.frontier.push(priority, n);
                self.stats.pushes += 1;
            }
        }
        self.stats.frontier_high_water = self.frontier.high_water();
        StepOutcome::Continue
    }

    fn push(&mut self, priority: Cost, cell: Cell) {
        self.frontier.push(priority, cell);
        self.stats.pushes += 1;
        self.stats.frontier_high_water = self.frontier.high_water();
    }

    fn finish(&mut self, outcome: SearchOutcome) -> StepOutcome {
        self.status = match outcome {
            SearchOutcome::Found => EngineStatus::Found,
            SearchOutcome::Exhausted => EngineStatus::Exhausted,
        };
        log::debug!(
            "search {} -> {} {:?}: {} expansions, {} stale pops, frontier peak {}",
            self.start,
            self.goal,
            outcome,
            self.stats.expansions,
            self.stats.stale_pops,
            self.stats.frontier_high_water,
        );
        outcome.into()
    }

    /// The path from `start` to `goal` recorded by the last run, or an empty
    /// path if there is none.
    ///
    /// `trace(c, c)` is `[c]` whether or not a search ran.
    pub fn trace(&self, start: Cell, goal: Cell) -> Path {
        self.try_trace(start, goal).unwrap_or_default()
    }

    /// Like [`trace`](Self::trace) but reports the missing path explicitly.
    pub fn try_trace(&self, start: Cell, goal: Cell) -> Result<Path, Unreachable> {
        path::trace(start, goal, &self.state)
    }

    /// Current lifecycle status.
    #[inline]
    pub fn status(&self) -> EngineStatus {
        self.status
    }

    /// The grid being searched.
    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    #[inline]
    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    #[inline]
    pub fn diagonals(&self) -> DiagonalMoves {
        self.diagonals
    }

    /// Endpoints of the current run, if one was started.
    pub fn endpoints(&self) -> Option<(Cell, Cell)> {
        match self.status {
            EngineStatus::Idle => None,
            _ => Some((self.start, self.goal)),
        }
    }

    /// Distance bookkeeping of the current run.
    #[inline]
    pub fn search_state(&self) -> &SearchState {
        &self.state
    }

    /// Best known distance to `cell`; final for visited cells.
    #[inline]
    pub fn distance_of(&self, cell: Cell) -> Cost {
        self.state.distance_of(cell)
    }

    /// Cells finalised so far, in order.
    #[inline]
    pub fn expanded(&self) -> &[Cell] {
        self.state.visit_order()
    }

    /// Number of frontier entries still queued, stale ones included.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Run an unguided search and return the shortest path (empty if the goal
/// is unreachable).
pub fn shortest_path(grid: &Grid, start: Cell, goal: Cell) -> Result<Path, InvalidEndpointError> {
    let mut engine = PathfindingEngine::new(grid);
    engine.find(start, goal)?;
    Ok(engine.trace(start, goal))
}
