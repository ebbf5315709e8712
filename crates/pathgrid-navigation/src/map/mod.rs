//! Grid-related functionality for navigation.
//!
//! This module provides the cell grid, its world/grid coordinate mapping,
//! obstacle rasterization and the neighbor graph used by path search.

pub mod cell;
pub mod grid;
mod neighbors;
pub mod point_types;
mod raster;

pub use cell::{Cell, CellId};
pub use grid::{Grid, GridConfig};
pub use point_types::{Aabb, GridPoint, WorldPoint};
