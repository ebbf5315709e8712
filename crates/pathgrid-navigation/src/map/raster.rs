//! Marks cells blocked from world-space obstacle geometry.
//!
//! Two passes over the obstacles that survive the layer mask:
//!
//! 1. Pivot pass: the cell containing each obstacle's pivot is blocked, so
//!    obstacles much smaller than a cell still register.
//! 2. Overlap pass: every still-open cell is tested against every obstacle
//!    footprint and blocked on the first overlap, catching obstacles that
//!    straddle cell edges away from their pivot.
//!
//! This is `O(cells x obstacles)` and only ever runs while a grid is built.

use tracing::debug;

use super::cell::Cell;
use super::grid::Layout;
use crate::obstacle::{LayerMask, Obstacle};

/// Counts gathered while rasterizing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RasterStats {
    /// Obstacles handed in.
    pub(crate) considered: usize,
    /// Obstacles left after the layer mask.
    pub(crate) retained: usize,
    /// Cells blocked by the pivot pass.
    pub(crate) pivot_blocked: usize,
    /// Cells blocked by the overlap pass.
    pub(crate) overlap_blocked: usize,
}

impl RasterStats {
    pub(crate) fn blocked(&self) -> usize {
        self.pivot_blocked + self.overlap_blocked
    }
}

/// Blocks every cell of `cells` that an obstacle selected by `mask` touches.
///
/// Cells that are already blocked stay blocked and are not counted again, so
/// running this twice with the same obstacles leaves the same blocked set.
pub(crate) fn rasterize(
    layout: &Layout,
    cells: &mut [Cell],
    obstacles: &[Obstacle],
    mask: LayerMask,
) -> RasterStats {
    let retained: Vec<&Obstacle> = obstacles
        .iter()
        .filter(|o| mask.intersects(o.layer_bit()))
        .collect();

    let mut stats = RasterStats {
        considered: obstacles.len(),
        retained: retained.len(),
        ..RasterStats::default()
    };

    for obstacle in &retained {
        let Some(index) = layout
            .world_to_grid(obstacle.position)
            .and_then(|p| layout.index_of(p))
        else {
            continue;
        };
        let cell = &mut cells[index];
        if !cell.is_blocked() {
            cell.block();
            stats.pivot_blocked += 1;
        }
    }

    for cell in cells.iter_mut().filter(|c| !c.is_blocked()) {
        if retained.iter().any(|o| cell.bounds().intersects(&o.bounds)) {
            cell.block();
            stats.overlap_blocked += 1;
        }
    }

    debug!(
        considered = stats.considered,
        retained = stats.retained,
        pivot_blocked = stats.pivot_blocked,
        overlap_blocked = stats.overlap_blocked,
        "Rasterized obstacles"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::grid::GridConfig;
    use crate::map::{CellId, GridPoint, WorldPoint};
    use nalgebra::Vector2;

    fn setup(width: f32, depth: f32, cell_size: f32) -> (Layout, Vec<Cell>) {
        let layout = Layout::from_config(&GridConfig::new(width, depth, cell_size)).unwrap();
        let cells = (0..layout.len())
            .map(|i| {
                let coords = layout.coords_of(i);
                Cell::new(CellId(i as u32), coords, layout.cell_center(coords), cell_size)
            })
            .collect();
        (layout, cells)
    }

    fn blocked_coords(cells: &[Cell]) -> Vec<GridPoint> {
        cells
            .iter()
            .filter(|c| c.is_blocked())
            .map(Cell::coords)
            .collect()
    }

    #[test]
    fn test_no_obstacles_leaves_grid_open() {
        let (layout, mut cells) = setup(10.0, 10.0, 2.0);
        let stats = rasterize(&layout, &mut cells, &[], LayerMask::ALL);
        assert_eq!(stats, RasterStats::default());
        assert!(blocked_coords(&cells).is_empty());
    }

    #[test]
    fn test_small_obstacle_blocked_by_pivot() {
        let (layout, mut cells) = setup(10.0, 10.0, 2.0);
        // Footprint far smaller than a cell, fully inside cell (3, 1).
        let obstacles = [Obstacle::centered(
            WorldPoint::new(2.3, -2.2),
            Vector2::new(0.1, 0.1),
            0,
        )];
        let stats = rasterize(&layout, &mut cells, &obstacles, LayerMask::ALL);
        assert_eq!(stats.pivot_blocked, 1);
        assert_eq!(stats.overlap_blocked, 0);
        assert_eq!(blocked_coords(&cells), vec![GridPoint::new(3, 1)]);
    }

    #[test]
    fn test_straddling_obstacle_blocked_by_overlap() {
        let (layout, mut cells) = setup(10.0, 10.0, 2.0);
        // Pivot in cell (0, 0); footprint reaches into columns 1 and 2 on row 0.
        let obstacles = [Obstacle::new(
            WorldPoint::new(-4.5, -4.5),
            crate::map::Aabb::new(WorldPoint::new(-4.8, -4.8), WorldPoint::new(-0.5, -4.2)),
            0,
        )];
        let stats = rasterize(&layout, &mut cells, &obstacles, LayerMask::ALL);
        assert_eq!(stats.pivot_blocked, 1);
        assert_eq!(stats.overlap_blocked, 2);
        assert_eq!(
            blocked_coords(&cells),
            vec![
                GridPoint::new(0, 0),
                GridPoint::new(1, 0),
                GridPoint::new(2, 0)
            ]
        );
    }

    #[test]
    fn test_touching_edge_counts_as_overlap() {
        let (layout, mut cells) = setup(10.0, 10.0, 2.0);
        // Right edge sits exactly on the boundary between columns 0 and 1.
        let obstacles = [Obstacle::new(
            WorldPoint::new(-4.0, -4.0),
            crate::map::Aabb::new(WorldPoint::new(-4.5, -4.5), WorldPoint::new(-3.0, -3.5)),
            0,
        )];
        rasterize(&layout, &mut cells, &obstacles, LayerMask::ALL);
        assert_eq!(
            blocked_coords(&cells),
            vec![GridPoint::new(0, 0), GridPoint::new(1, 0)]
        );
    }

    #[test]
    fn test_off_grid_pivot_still_overlaps() {
        let (layout, mut cells) = setup(10.0, 10.0, 2.0);
        let obstacles = [Obstacle::centered(
            WorldPoint::new(-6.0, 0.0),
            Vector2::new(3.0, 0.5),
            0,
        )];
        let stats = rasterize(&layout, &mut cells, &obstacles, LayerMask::ALL);
        assert_eq!(stats.pivot_blocked, 0);
        assert_eq!(blocked_coords(&cells), vec![GridPoint::new(0, 2)]);
    }

    #[test]
    fn test_masked_out_obstacles_are_ignored() {
        let (layout, mut cells) = setup(10.0, 10.0, 2.0);
        let obstacles = [
            Obstacle::centered(WorldPoint::new(0.0, 0.0), Vector2::new(0.5, 0.5), 4),
            Obstacle::centered(WorldPoint::new(4.0, 4.0), Vector2::new(0.5, 0.5), 5),
        ];
        let stats = rasterize(&layout, &mut cells, &obstacles, LayerMask::from_layers(&[5]));
        assert_eq!(stats.considered, 2);
        assert_eq!(stats.retained, 1);
        assert_eq!(blocked_coords(&cells), vec![GridPoint::new(4, 4)]);
        // Input is left untouched.
        assert_eq!(obstacles[0].layer, 4);
    }

    #[test]
    fn test_rasterization_is_idempotent() {
        let (layout, mut cells) = setup(12.0, 12.0, 1.0);
        let obstacles = [
            Obstacle::centered(WorldPoint::new(0.2, 0.2), Vector2::new(2.5, 0.4), 0),
            Obstacle::centered(WorldPoint::new(-3.0, 4.1), Vector2::new(0.2, 3.0), 0),
            Obstacle::centered(WorldPoint::new(5.5, -5.5), Vector2::new(0.1, 0.1), 0),
        ];
        let first = rasterize(&layout, &mut cells, &obstacles, LayerMask::ALL);
        let once = blocked_coords(&cells);
        assert_eq!(once.len(), first.blocked());

        let second = rasterize(&layout, &mut cells, &obstacles, LayerMask::ALL);
        assert_eq!(blocked_coords(&cells), once);
        assert_eq!(second.blocked(), 0);
    }
}
