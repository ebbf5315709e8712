//! The navigation grid: construction, spatial queries and path search entry point.
//!
//! A [`Grid`] covers a `width x depth` area centered on the world origin with
//! square cells of a single size. Building one runs the whole pipeline in a
//! fixed order: lay out the cells, rasterize obstacles onto them, then derive
//! the neighbor graph. Nothing about the grid changes after that, so every
//! query takes `&self` and a built grid can be shared freely between readers.

#![warn(missing_docs)]

use std::fmt;

use nalgebra::Vector2;
use tracing::info;

use super::cell::{Cell, CellId};
use super::{Aabb, GridPoint, WorldPoint, neighbors, raster};
use crate::astar::AStarSearch;
use crate::error::{NavigationError, NavigationResult};
use crate::obstacle::{LayerMask, ObstacleSource};
use crate::search::{Path, PathSearch, Unreachable};

/// Construction parameters for a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Total extent of the grid along the x axis (world units).
    pub width: f32,
    /// Total extent of the grid along the y axis (world units).
    pub depth: f32,
    /// Edge length of every (square) cell.
    pub cell_size: f32,
    /// Also link diagonal neighbors.
    pub allow_corner_cutting: bool,
    /// Layers whose obstacles block cells.
    pub obstacle_mask: LayerMask,
}

impl GridConfig {
    /// Creates a config with corner cutting disabled and every layer treated as an obstacle.
    #[must_use]
    pub fn new(width: f32, depth: f32, cell_size: f32) -> Self {
        Self {
            width,
            depth,
            cell_size,
            ..Self::default()
        }
    }

    /// Sets whether diagonal neighbors are linked.
    #[must_use]
    pub fn with_corner_cutting(mut self, allow: bool) -> Self {
        self.allow_corner_cutting = allow;
        self
    }

    /// Sets which layers count as obstacles.
    #[must_use]
    pub fn with_obstacle_mask(mut self, mask: LayerMask) -> Self {
        self.obstacle_mask = mask;
        self
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            depth: 100.0,
            cell_size: 2.0,
            allow_corner_cutting: false,
            obstacle_mask: LayerMask::ALL,
        }
    }
}

/// Shape of a grid and the mapping between world and grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Layout {
    pub(crate) columns: usize,
    pub(crate) rows: usize,
    pub(crate) cell_size: f32,
    /// World position of the minimum corner of cell (0, 0).
    pub(crate) origin: WorldPoint,
}

impl Layout {
    pub(crate) fn from_config(config: &GridConfig) -> NavigationResult<Self> {
        let GridConfig {
            width,
            depth,
            cell_size,
            ..
        } = *config;

        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(NavigationError::InvalidCellSize(cell_size));
        }
        if !width.is_finite() || !depth.is_finite() {
            return Err(NavigationError::InvalidExtents { width, depth });
        }

        // Float-to-usize casts saturate: negative extents give zero cells.
        let columns = (width / cell_size).floor() as usize;
        let rows = (depth / cell_size).floor() as usize;
        if columns == 0 || rows == 0 {
            return Err(NavigationError::DegenerateGrid {
                width,
                depth,
                cell_size,
                columns,
                rows,
            });
        }

        // Cell ids are u32.
        match columns.checked_mul(rows) {
            Some(total) if total <= u32::MAX as usize => {}
            _ => return Err(NavigationError::TooManyCells { columns, rows }),
        }

        Ok(Self {
            columns,
            rows,
            cell_size,
            origin: WorldPoint::new((width * -0.5).ceil(), (depth * -0.5).ceil()),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.columns * self.rows
    }

    pub(crate) fn contains(&self, p: GridPoint) -> bool {
        p.x < self.columns && p.y < self.rows
    }

    /// Storage index of `p`, row-major.
    pub(crate) fn index_of(&self, p: GridPoint) -> Option<usize> {
        self.contains(p).then(|| p.y * self.columns + p.x)
    }

    pub(crate) fn coords_of(&self, index: usize) -> GridPoint {
        GridPoint::new(index % self.columns, index / self.columns)
    }

    /// The in-bounds cell `(dx, dy)` steps away from `p`, if any.
    pub(crate) fn offset(&self, p: GridPoint, dx: isize, dy: isize) -> Option<GridPoint> {
        let x = p.x.checked_add_signed(dx)?;
        let y = p.y.checked_add_signed(dy)?;
        let q = GridPoint::new(x, y);
        self.contains(q).then_some(q)
    }

    pub(crate) fn cell_center(&self, p: GridPoint) -> WorldPoint {
        WorldPoint::new(
            self.origin.x + (p.x as f32 + 0.5) * self.cell_size,
            self.origin.y + (p.y as f32 + 0.5) * self.cell_size,
        )
    }

    /// Converts a world position to the grid coordinates of the cell containing it.
    ///
    /// Cell footprints include their edges, so a point on the grid's outer
    /// maximum edge still belongs to the last row or column. A point on an
    /// edge shared by two cells resolves to the cell with the higher index.
    pub(crate) fn world_to_grid(&self, p: WorldPoint) -> Option<GridPoint> {
        let grid_x_f = (p.x - self.origin.x) / self.cell_size;
        let grid_y_f = (p.y - self.origin.y) / self.cell_size;

        // Written so that NaN falls through to `None`.
        let inside = grid_x_f >= 0.0
            && grid_x_f <= self.columns as f32
            && grid_y_f >= 0.0
            && grid_y_f <= self.rows as f32;
        if !inside {
            return None;
        }

        let grid_x = (grid_x_f.floor() as usize).min(self.columns - 1);
        let grid_y = (grid_y_f.floor() as usize).min(self.rows - 1);
        Some(GridPoint::new(grid_x, grid_y))
    }

    pub(crate) fn world_bounds(&self) -> Aabb {
        let size = Vector2::new(
            self.columns as f32 * self.cell_size,
            self.rows as f32 * self.cell_size,
        );
        Aabb::new(self.origin, self.origin + size)
    }

    fn build_cells(&self) -> Vec<Cell> {
        (0..self.len())
            .map(|index| {
                let coords = self.coords_of(index);
                Cell::new(
                    CellId(index as u32),
                    coords,
                    self.cell_center(coords),
                    self.cell_size,
                )
            })
            .collect()
    }
}

/// A navigable grid of square cells with a fixed obstacle layout.
pub struct Grid {
    config: GridConfig,
    layout: Layout,
    cells: Vec<Cell>,
    search: Box<dyn PathSearch>,
}

impl Grid {
    /// Builds a grid that answers [`Grid::find_path`] with the default A* search.
    ///
    /// # Arguments
    /// * `config` - Extents, cell size, corner-cutting policy and obstacle mask
    /// * `obstacles` - Scene obstacles; read once and not retained
    ///
    /// # Returns
    /// * `NavigationResult<Self>` - The built grid or the configuration error that prevented it
    pub fn new<O>(config: GridConfig, obstacles: &O) -> NavigationResult<Self>
    where
        O: ObstacleSource + ?Sized,
    {
        Self::with_search(config, obstacles, AStarSearch::default())
    }

    /// Builds a grid that delegates [`Grid::find_path`] to `search`.
    ///
    /// # Arguments
    /// * `config` - Extents, cell size, corner-cutting policy and obstacle mask
    /// * `obstacles` - Scene obstacles; read once and not retained
    /// * `search` - Path search strategy owned by the grid
    ///
    /// # Returns
    /// * `NavigationResult<Self>` - The built grid or the configuration error that prevented it
    pub fn with_search<O, S>(config: GridConfig, obstacles: &O, search: S) -> NavigationResult<Self>
    where
        O: ObstacleSource + ?Sized,
        S: PathSearch + 'static,
    {
        let layout = Layout::from_config(&config)?;
        let mut cells = layout.build_cells();

        let obstacles = obstacles.obstacles();
        let raster_stats = raster::rasterize(&layout, &mut cells, &obstacles, config.obstacle_mask);
        let links = neighbors::link_neighbors(&layout, &mut cells, config.allow_corner_cutting);

        info!(
            columns = layout.columns,
            rows = layout.rows,
            cell_size = layout.cell_size,
            blocked = raster_stats.blocked(),
            links,
            corner_cutting = config.allow_corner_cutting,
            search = search.name(),
            "Grid built"
        );

        Ok(Self {
            config,
            layout,
            cells,
            search: Box::new(search),
        })
    }

    /// Gets the configuration the grid was built from.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Number of columns (cells along x).
    pub fn columns(&self) -> usize {
        self.layout.columns
    }

    /// Number of rows (cells along y).
    pub fn rows(&self) -> usize {
        self.layout.rows
    }

    /// Edge length of a cell.
    pub fn cell_size(&self) -> f32 {
        self.layout.cell_size
    }

    /// Whether diagonal neighbors are linked.
    pub fn allow_corner_cutting(&self) -> bool {
        self.config.allow_corner_cutting
    }

    /// World position of the grid's minimum corner.
    pub fn origin(&self) -> WorldPoint {
        self.layout.origin
    }

    /// World-space area covered by the cells.
    pub fn world_bounds(&self) -> Aabb {
        self.layout.world_bounds()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in storage order (row by row, starting at row 0).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Gets the cell at grid coordinates `p`.
    pub fn cell(&self, p: GridPoint) -> Option<&Cell> {
        self.layout.index_of(p).map(|index| &self.cells[index])
    }

    /// Gets a cell by id.
    pub fn cell_by_id(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    /// Iterates over the neighbors of `id`, blocked ones included.
    pub fn neighbors(&self, id: CellId) -> impl Iterator<Item = &Cell> + '_ {
        self.cell_by_id(id)
            .map(Cell::neighbors)
            .unwrap_or_default()
            .iter()
            .map(|n| &self.cells[n.index()])
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_blocked()).count()
    }

    /// Number of walkable cells.
    pub fn walkable_count(&self) -> usize {
        self.len() - self.blocked_count()
    }

    /// Name of the path search strategy in use.
    pub fn search_name(&self) -> &'static str {
        self.search.name()
    }

    /// Finds the cell whose footprint contains `p`.
    ///
    /// # Returns
    /// * `Option<&Cell>` - The containing cell, or `None` if `p` lies outside the grid
    pub fn cell_at(&self, p: WorldPoint) -> Option<&Cell> {
        self.layout
            .world_to_grid(p)
            .and_then(|grid_p| self.cell(grid_p))
    }

    /// Finds the walkable cell whose center is closest to `p`.
    ///
    /// Ties go to whichever cell comes first in storage order; callers should
    /// not rely on that.
    ///
    /// # Returns
    /// * `Option<&Cell>` - The closest walkable cell, or `None` if every cell is blocked
    pub fn nearest_walkable(&self, p: WorldPoint) -> Option<&Cell> {
        let mut shortest = f32::MAX;
        let mut closest = None;
        for cell in self.cells.iter().filter(|c| c.is_walkable()) {
            let distance = cell.distance_squared(&p);
            if distance < shortest {
                shortest = distance;
                closest = Some(cell);
            }
        }
        closest
    }

    /// Resolves a path endpoint to a walkable cell.
    ///
    /// Uses the cell containing `p` when it is walkable, otherwise the nearest
    /// walkable cell, so endpoints off the grid or inside an obstacle snap to
    /// the closest place an agent can stand.
    pub fn resolve_endpoint(&self, p: WorldPoint) -> Option<&Cell> {
        match self.cell_at(p) {
            Some(cell) if cell.is_walkable() => Some(cell),
            _ => self.nearest_walkable(p),
        }
    }

    /// Finds a route from `start` to `goal` with the grid's search strategy.
    ///
    /// # Returns
    /// * `Result<Path, Unreachable>` - The route, or why there is none
    pub fn find_path(&self, start: WorldPoint, goal: WorldPoint) -> Result<Path, Unreachable> {
        self.search.find_path(self, start, goal)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("columns", &self.layout.columns)
            .field("rows", &self.layout.rows)
            .field("cell_size", &self.layout.cell_size)
            .field("origin", &self.layout.origin)
            .field("allow_corner_cutting", &self.config.allow_corner_cutting)
            .field("blocked", &self.blocked_count())
            .field("search", &self.search.name())
            .finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Grid ({}x{}, cell size: {:.3})",
            self.layout.columns, self.layout.rows, self.layout.cell_size
        )?;
        writeln!(
            f,
            "Origin: ({:.3}, {:.3})",
            self.layout.origin.x, self.layout.origin.y
        )?;

        // Highest row first so the printout reads like a map.
        for y in (0..self.layout.rows).rev() {
            for x in 0..self.layout.columns {
                let glyph = match self.cell(GridPoint::new(x, y)) {
                    Some(cell) if cell.is_blocked() => '#',
                    _ => '.',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
