//! Point and box types shared by the grid, the rasterizer and path search.

use std::fmt;

use nalgebra::{Point2, Vector2};

/// A point on the ground plane in world coordinates.
///
/// Height is not represented: every cell sits at the same fixed height, so
/// all containment and distance tests are planar.
pub type WorldPoint = Point2<f32>;

/// Represents a point in grid coordinates (cell indices).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPoint {
    /// The column index in the grid.
    pub x: usize,
    /// The row index in the grid.
    pub y: usize,
}

impl GridPoint {
    /// Creates a new `GridPoint`.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A planar axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x and y).
    pub min: WorldPoint,
    /// Maximum corner (largest x and y).
    pub max: WorldPoint,
}

impl Aabb {
    /// Creates a box from two corners, swapping components where `min > max`.
    #[must_use]
    pub fn new(min: WorldPoint, max: WorldPoint) -> Self {
        Self {
            min: WorldPoint::new(min.x.min(max.x), min.y.min(max.y)),
            max: WorldPoint::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Creates a box centered on `center` with the given half extent on each axis.
    #[must_use]
    pub fn from_center_half_extent(center: WorldPoint, half_extent: Vector2<f32>) -> Self {
        let half = half_extent.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Creates a box centered on `center` with the given full size.
    #[must_use]
    pub fn from_center_size(center: WorldPoint, size: Vector2<f32>) -> Self {
        Self::from_center_half_extent(center, size * 0.5)
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> WorldPoint {
        nalgebra::center(&self.min, &self.max)
    }

    /// Width and depth of the box.
    #[must_use]
    pub fn size(&self) -> Vector2<f32> {
        self.max - self.min
    }

    /// Returns true if `p` lies inside the box. Points on an edge are inside.
    #[must_use]
    pub fn contains(&self, p: &WorldPoint) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Returns true if the two boxes overlap on both axes. Touching edges count.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_corrects_swapped_corners() {
        let aabb = Aabb::new(WorldPoint::new(2.0, -1.0), WorldPoint::new(-2.0, 1.0));
        assert_eq!(aabb.min, WorldPoint::new(-2.0, -1.0));
        assert_eq!(aabb.max, WorldPoint::new(2.0, 1.0));
        assert_eq!(aabb.size(), Vector2::new(4.0, 2.0));
        assert_eq!(aabb.center(), WorldPoint::new(0.0, 0.0));
    }

    #[test]
    fn test_aabb_contains_is_inclusive() {
        let aabb = Aabb::from_center_size(WorldPoint::new(1.0, 1.0), Vector2::new(2.0, 2.0));
        assert!(aabb.contains(&WorldPoint::new(1.0, 1.0)));
        assert!(aabb.contains(&WorldPoint::new(0.0, 0.0))); // corner
        assert!(aabb.contains(&WorldPoint::new(2.0, 1.5))); // edge
        assert!(!aabb.contains(&WorldPoint::new(2.01, 1.0)));
        assert!(!aabb.contains(&WorldPoint::new(1.0, -0.01)));
    }

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::new(WorldPoint::new(0.0, 0.0), WorldPoint::new(2.0, 2.0));
        let overlapping = Aabb::new(WorldPoint::new(1.0, 1.0), WorldPoint::new(3.0, 3.0));
        let touching = Aabb::new(WorldPoint::new(2.0, 0.0), WorldPoint::new(4.0, 2.0));
        let corner_touching = Aabb::new(WorldPoint::new(2.0, 2.0), WorldPoint::new(3.0, 3.0));
        let apart = Aabb::new(WorldPoint::new(2.5, 0.0), WorldPoint::new(4.0, 2.0));
        let apart_on_y = Aabb::new(WorldPoint::new(0.0, 3.0), WorldPoint::new(2.0, 4.0));

        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
        assert!(a.intersects(&touching));
        assert!(a.intersects(&corner_touching));
        assert!(!a.intersects(&apart));
        assert!(!a.intersects(&apart_on_y));
    }

    #[test]
    fn test_grid_point_ordering_and_display() {
        assert!(GridPoint::new(0, 1) < GridPoint::new(1, 0));
        assert_eq!(format!("{}", GridPoint::new(3, 4)), "(3, 4)");
    }
}
