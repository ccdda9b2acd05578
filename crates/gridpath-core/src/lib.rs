//! **gridpath-core** — occupancy grid and cell geometry.
//!
//! This crate provides the data model shared by the *gridpath* search engine
//! and its front ends: [`Cell`] coordinates with their 8-connected step costs,
//! and the immutable [`Grid`] of free and blocked cells.

pub mod geom;
pub mod grid;

pub use geom::{CARDINAL_COST, Cell, Cost, DIAGONAL_COST, MOVES, step_cost};
pub use grid::{CellState, Grid, MalformedGridError, ParsedGrid};
