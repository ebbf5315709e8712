//! This module defines the error types used by the `pathgrid-navigation` crate.

#![warn(missing_docs)]

use thiserror::Error;

/// Error type for grid construction.
///
/// Every variant is a configuration error: it is raised while a [`crate::Grid`]
/// is being built and no partial grid is ever returned alongside it.
/// Query misses (a point off the grid, no walkable cell, no route) are not
/// errors and are reported through `Option` or [`crate::Unreachable`] instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
    /// The configured cell size is zero, negative or not a finite number.
    #[error("Invalid cell size: {0} (must be a positive, finite number)")]
    InvalidCellSize(f32),

    /// The configured extents are not finite numbers.
    #[error("Invalid grid extents: {width} x {depth} (must be finite)")]
    InvalidExtents {
        /// Configured width of the grid area.
        width: f32,
        /// Configured depth of the grid area.
        depth: f32,
    },

    /// The extents are too small for even one cell along some axis.
    #[error(
        "Degenerate grid: {width} x {depth} with cell size {cell_size} gives {columns} x {rows} cells"
    )]
    DegenerateGrid {
        /// Configured width of the grid area.
        width: f32,
        /// Configured depth of the grid area.
        depth: f32,
        /// Configured cell size.
        cell_size: f32,
        /// Computed number of columns.
        columns: usize,
        /// Computed number of rows.
        rows: usize,
    },

    /// The grid would hold more cells than can be addressed.
    #[error("Grid of {columns} x {rows} cells is too large")]
    TooManyCells {
        /// Computed number of columns.
        columns: usize,
        /// Computed number of rows.
        rows: usize,
    },
}

/// Result type for grid construction.
pub type NavigationResult<T> = std::result::Result<T, NavigationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NavigationError::InvalidCellSize(-1.0);
        assert!(format!("{err}").contains("-1"));

        let err = NavigationError::DegenerateGrid {
            width: 1.0,
            depth: 10.0,
            cell_size: 2.0,
            columns: 0,
            rows: 5,
        };
        assert!(format!("{err}").contains("0 x 5 cells"));
    }
}
