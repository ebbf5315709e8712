//! The path search contract between a [`Grid`] and the strategy it owns.

use std::fmt;

use thiserror::Error;

use crate::map::{CellId, Grid, WorldPoint};

/// A path search strategy plugged into a [`Grid`] at construction.
///
/// Implementations read the grid's neighbor graph, skip blocked cells, and
/// must not assume anything about how ties between equal-cost routes are
/// broken by other strategies.
pub trait PathSearch: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Finds a route from `start` to `goal` over `grid`.
    ///
    /// # Arguments
    /// * `grid` - The grid to plan in.
    /// * `start` - Starting point in world coordinates.
    /// * `goal` - Goal point in world coordinates.
    ///
    /// # Returns
    /// * `Result<Path, Unreachable>` - The route, or why there is none.
    fn find_path(&self, grid: &Grid, start: WorldPoint, goal: WorldPoint) -> Result<Path, Unreachable>;
}

/// A route through the grid, start cell first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Cells visited, from the start cell to the goal cell inclusive.
    pub cells: Vec<CellId>,
    /// World-space centers of `cells`.
    pub waypoints: Vec<WorldPoint>,
    /// Sum of step lengths between consecutive waypoints.
    pub total_cost: f32,
    /// The number of cells expanded during the search.
    pub nodes_explored: usize,
}

impl Path {
    /// Number of cells on the route.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the route holds no cells. Routes produced by a search never are.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell the route starts in.
    pub fn start(&self) -> Option<CellId> {
        self.cells.first().copied()
    }

    /// The cell the route ends in.
    pub fn goal(&self) -> Option<CellId> {
        self.cells.last().copied()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Path {{ path_length: {}, total_cost: {:.3}, nodes_explored: {} }}",
            self.len(),
            self.total_cost,
            self.nodes_explored
        )
    }
}

/// Why no route could be produced. An expected outcome, not a fault.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unreachable {
    /// The grid has no walkable cell to resolve an endpoint to.
    #[error("no walkable cell to start or end on")]
    NoWalkableCell,

    /// Start and goal resolved to cells that are not connected through walkable cells.
    #[error("goal is walled off from start after exploring {nodes_explored} cells")]
    Disconnected {
        /// The number of cells expanded before the search gave up.
        nodes_explored: usize,
    },
}
