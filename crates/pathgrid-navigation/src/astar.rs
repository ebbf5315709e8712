/*

A* = f(n) = g(n) + h(n)

Where:
    n = a cell in the grid
    g(n) = length of the cheapest known route from the start cell to n
    h(n) = estimated remaining length from n to the goal cell (heuristic)
    f(n) = estimated length of the cheapest route through n

Step cost between linked cells is the distance between their centers, so an
orthogonal step costs one cell size and a diagonal step sqrt(2) cell sizes.

*/

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::map::{Cell, CellId, Grid, WorldPoint};
use crate::search::{Path, PathSearch, Unreachable};

/// Estimate of the remaining route length used to order the open set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Heuristic {
    /// Straight-line distance. Admissible with or without corner cutting.
    #[default]
    Euclidean,
    /// Sum of axis distances. Only admissible when corner cutting is off.
    Manhattan,
    /// No estimate; the search degrades to Dijkstra's algorithm.
    Zero,
}

impl Heuristic {
    /// Estimated distance between two points.
    pub fn estimate(self, a: &WorldPoint, b: &WorldPoint) -> f32 {
        match self {
            Heuristic::Euclidean => (*a - *b).norm(),
            Heuristic::Manhattan => manhattan_distance(a, b),
            Heuristic::Zero => 0.0,
        }
    }
}

/// Calculates the Manhattan distance between two world points.
pub fn manhattan_distance(a: &WorldPoint, b: &WorldPoint) -> f32 {
    // element-wise |x-y|, then Σ
    a.coords.zip_map(&b.coords, |x, y| (x - y).abs()).sum()
}

/// A* over a grid's neighbor graph.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AStarSearch {
    /// Estimate used to prioritize cells.
    pub heuristic: Heuristic,
}

impl AStarSearch {
    /// Creates a search using `heuristic`.
    pub const fn new(heuristic: Heuristic) -> Self {
        Self { heuristic }
    }

    /// A search that explores uniformly outward from the start.
    pub const fn dijkstra() -> Self {
        Self::new(Heuristic::Zero)
    }

    /// Finds the cheapest route between two cells of `grid`.
    ///
    /// Both cells must be walkable; a blocked endpoint is unreachable.
    ///
    /// # Arguments
    /// * `grid` - The grid to plan in.
    /// * `start` - Starting cell.
    /// * `goal` - Goal cell.
    ///
    /// # Returns
    /// * `Result<Path, Unreachable>` - The route with search metadata, or why there is none.
    pub fn search_cells(&self, grid: &Grid, start: CellId, goal: CellId) -> Result<Path, Unreachable> {
        let mut nodes_explored = 0;

        let (Some(start_cell), Some(goal_cell)) = (grid.cell_by_id(start), grid.cell_by_id(goal)) else {
            return Err(Unreachable::NoWalkableCell);
        };
        if start_cell.is_blocked() || goal_cell.is_blocked() {
            return Err(Unreachable::Disconnected { nodes_explored });
        }
        let goal_center = goal_cell.center();

        let n = grid.len();
        let mut g_score = vec![f32::INFINITY; n];
        let mut came_from: Vec<Option<CellId>> = vec![None; n];
        let mut closed = vec![false; n];

        g_score[start.index()] = 0.0;
        let mut open_set = BinaryHeap::new();
        open_set.push(State {
            cost: self.heuristic.estimate(&start_cell.center(), &goal_center),
            cell: start,
        });

        while let Some(State { cell: current, .. }) = open_set.pop() {
            if closed[current.index()] {
                continue;
            }
            closed[current.index()] = true;
            nodes_explored += 1;

            if current == goal {
                let path = reconstruct_path(grid, &came_from, current, g_score[current.index()], nodes_explored);
                debug!(
                    path_length = path.len(),
                    total_cost = path.total_cost,
                    nodes_explored,
                    "Path found"
                );
                return Ok(path);
            }

            let current_cell = &grid.cells()[current.index()];
            for neighbor in grid.neighbors(current) {
                let index = neighbor.id().index();
                if neighbor.is_blocked() || closed[index] {
                    continue;
                }

                let tentative_g_score = g_score[current.index()] + step_cost(current_cell, neighbor);
                if tentative_g_score < g_score[index] {
                    came_from[index] = Some(current);
                    g_score[index] = tentative_g_score;
                    let h = self.heuristic.estimate(&neighbor.center(), &goal_center);
                    trace!(cell = %neighbor.coords(), g = tentative_g_score, h, "Queued cell");
                    open_set.push(State {
                        cost: tentative_g_score + h,
                        cell: neighbor.id(),
                    });
                }
            }
        }

        debug!(nodes_explored, "No path found");
        Err(Unreachable::Disconnected { nodes_explored })
    }
}

impl PathSearch for AStarSearch {
    fn name(&self) -> &'static str {
        match self.heuristic {
            Heuristic::Zero => "dijkstra",
            Heuristic::Euclidean | Heuristic::Manhattan => "astar",
        }
    }

    fn find_path(&self, grid: &Grid, start: WorldPoint, goal: WorldPoint) -> Result<Path, Unreachable> {
        let start_cell = grid.resolve_endpoint(start).ok_or(Unreachable::NoWalkableCell)?;
        let goal_cell = grid.resolve_endpoint(goal).ok_or(Unreachable::NoWalkableCell)?;
        debug!(
            start = %start_cell.coords(),
            goal = %goal_cell.coords(),
            search = self.name(),
            "Resolved path endpoints"
        );
        self.search_cells(grid, start_cell.id(), goal_cell.id())
    }
}

fn step_cost(from: &Cell, to: &Cell) -> f32 {
    (to.center() - from.center()).norm()
}

#[derive(Copy, Clone, Debug)]
struct State {
    cost: f32,
    cell: CellId,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

// The priority queue depends on `Ord`.
// Costs are flipped so the queue becomes a min-heap; ties go to the lower cell id.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reconstructs the path from the `came_from` links, start cell first.
fn reconstruct_path(
    grid: &Grid,
    came_from: &[Option<CellId>],
    mut current: CellId,
    total_cost: f32,
    nodes_explored: usize,
) -> Path {
    let mut cells = vec![current];
    while let Some(previous) = came_from[current.index()] {
        cells.push(previous);
        current = previous;
    }
    cells.reverse();

    let waypoints = cells
        .iter()
        .map(|id| grid.cells()[id.index()].center())
        .collect();
    Path {
        cells,
        waypoints,
        total_cost,
        nodes_explored,
    }
}
