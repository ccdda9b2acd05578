//! Shortest paths on 8-connected occupancy grids.
//!
//! This crate searches a [`Grid`](gridpath_core::Grid) of free and blocked
//! cells for a minimum-cost route, where cardinal steps cost 1 and diagonal
//! steps cost √2:
//!
//! - **Dijkstra** label-setting search ([`PathfindingEngine::new`])
//! - **A\*** guided by the octile distance ([`PathfindingEngine::guided`]) or
//!   any other [`Heuristic`] ([`PathfindingEngine::with_heuristic`])
//! - **Stepwise** execution for visualisers ([`PathfindingEngine::begin`],
//!   [`PathfindingEngine::step`])
//! - **Reconstruction** of the route from the predecessor map
//!   ([`PathfindingEngine::trace`], [`trace`])
//!
//! The frontier never decreases a key in place. Improved cells are pushed
//! again and stale entries are skipped when popped (lazy deletion), and
//! equal priorities pop in insertion order, so identical inputs always give
//! identical paths.
//!
//! | Type | Role |
//! |---|---|
//! | [`Frontier`] | min-priority queue of `(cost, cell)` |
//! | [`SearchState`] | distances, visited set, predecessors |
//! | [`PathfindingEngine`] | the search loop and its lifecycle |
//! | [`Path`] | ordered start-to-goal cells |

mod distance;
mod engine;
mod error;
mod frontier;
mod neighbors;
mod path;
mod state;
mod traits;

pub use distance::{chebyshev, euclidean, manhattan, octile};
pub use engine::{
    EngineStatus, PathfindingEngine, SearchOutcome, SearchStats, StepOutcome, shortest_path,
};
pub use error::{Endpoint, InvalidEndpointError, Unreachable};
pub use frontier::Frontier;
pub use neighbors::{DiagonalMoves, Neighbors};
pub use path::{Path, trace};
pub use state::{PathNode, SearchState};
pub use traits::{Heuristic, Octile, Zero};
