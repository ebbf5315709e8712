//! A single unit of the navigation grid.

use std::fmt;

use super::{Aabb, GridPoint, WorldPoint};

/// Dense index of a cell within the [`Grid`](super::Grid) that owns it.
///
/// Cells refer to each other through ids rather than pointers; an id is only
/// meaningful for the grid that produced it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(pub u32);

impl CellId {
    /// Position of the cell in the grid's cell storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A grid cell with a fixed world-space footprint.
///
/// The footprint never changes after construction. `blocked` only ever goes
/// from `false` to `true`, during rasterization, and the neighbor list is
/// filled once while the neighbor graph is derived.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    id: CellId,
    coords: GridPoint,
    center: WorldPoint,
    bounds: Aabb,
    blocked: bool,
    neighbors: Vec<CellId>,
}

impl Cell {
    pub(crate) fn new(id: CellId, coords: GridPoint, center: WorldPoint, size: f32) -> Self {
        let half = size * 0.5;
        Self {
            id,
            coords,
            center,
            bounds: Aabb::from_center_half_extent(center, nalgebra::Vector2::new(half, half)),
            blocked: false,
            neighbors: Vec::with_capacity(8),
        }
    }

    /// Id of this cell within its grid.
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Column and row of this cell.
    pub fn coords(&self) -> GridPoint {
        self.coords
    }

    /// World-space center of this cell.
    pub fn center(&self) -> WorldPoint {
        self.center
    }

    /// World-space footprint of this cell.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Returns true if an obstacle was rasterized onto this cell.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Returns true if this cell is not blocked.
    pub fn is_walkable(&self) -> bool {
        !self.blocked
    }

    /// Adjacent cells, including blocked ones.
    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }

    /// Returns true if `p` lies within this cell's footprint (edges included).
    pub fn contains(&self, p: &WorldPoint) -> bool {
        self.bounds.contains(p)
    }

    /// Squared planar distance from this cell's center to `p`.
    pub fn distance_squared(&self, p: &WorldPoint) -> f32 {
        (self.center - *p).norm_squared()
    }

    pub(crate) fn block(&mut self) {
        self.blocked = true;
    }

    /// Adds `neighbor` unless it is already linked.
    pub(crate) fn add_neighbor(&mut self, neighbor: CellId) {
        if neighbor != self.id && !self.neighbors.contains(&neighbor) {
            self.neighbors.push(neighbor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cell() -> Cell {
        Cell::new(CellId(7), GridPoint::new(2, 1), WorldPoint::new(1.0, -1.0), 2.0)
    }

    #[test]
    fn test_bounds_follow_center_and_size() {
        let cell = sample_cell();
        assert_eq!(cell.bounds().min, WorldPoint::new(0.0, -2.0));
        assert_eq!(cell.bounds().max, WorldPoint::new(2.0, 0.0));
        assert!(cell.contains(&WorldPoint::new(1.5, -0.5)));
        assert!(!cell.contains(&WorldPoint::new(2.5, -0.5)));
    }

    #[test]
    fn test_new_cell_is_open_and_unlinked() {
        let cell = sample_cell();
        assert!(cell.is_walkable());
        assert!(cell.neighbors().is_empty());
        assert_eq!(cell.id().index(), 7);
        assert_eq!(cell.coords(), GridPoint::new(2, 1));
    }

    #[test]
    fn test_block_is_sticky() {
        let mut cell = sample_cell();
        cell.block();
        cell.block();
        assert!(cell.is_blocked());
    }

    #[test]
    fn test_add_neighbor_skips_duplicates_and_self() {
        let mut cell = sample_cell();
        cell.add_neighbor(CellId(3));
        cell.add_neighbor(CellId(3));
        cell.add_neighbor(CellId(7));
        assert_eq!(cell.neighbors(), &[CellId(3)]);
    }

    #[test]
    fn test_distance_squared() {
        let cell = sample_cell();
        assert_eq!(cell.distance_squared(&WorldPoint::new(4.0, 3.0)), 25.0);
    }
}
