//! Pre-flight search errors and the unreachable outcome.

use std::fmt;

use gridpath_core::Cell;

/// Which end of a query an [`InvalidEndpointError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// A start or goal that cannot take part in a search.
///
/// Returned before any search state is touched; the engine stays idle and
/// may be retried with corrected endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidEndpointError {
    /// The cell lies outside the grid.
    OutOfBounds { endpoint: Endpoint, cell: Cell },
    /// The cell is a wall.
    Blocked { endpoint: Endpoint, cell: Cell },
}

impl InvalidEndpointError {
    /// The endpoint that was rejected.
    pub fn endpoint(&self) -> Endpoint {
        match *self {
            Self::OutOfBounds { endpoint, .. } | Self::Blocked { endpoint, .. } => endpoint,
        }
    }

    /// The offending cell.
    pub fn cell(&self) -> Cell {
        match *self {
            Self::OutOfBounds { cell, .. } | Self::Blocked { cell, .. } => cell,
        }
    }
}

impl fmt::Display for InvalidEndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { endpoint, cell } => {
                write!(f, "{endpoint} {cell} is outside the grid")
            }
            Self::Blocked { endpoint, cell } => write!(f, "{endpoint} {cell} is blocked"),
        }
    }
}

impl std::error::Error for InvalidEndpointError {}

/// No path connects `start` to `goal`.
///
/// This is an ordinary search result rather than a fault; it implements
/// [`Error`](std::error::Error) so callers that treat it as one can use `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unreachable {
    pub start: Cell,
    pub goal: Cell,
}

impl fmt::Display for Unreachable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no path from {} to {}", self.start, self.goal)
    }
}

impl std::error::Error for Unreachable {}
