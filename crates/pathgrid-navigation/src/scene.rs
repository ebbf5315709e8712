//! Ownership of the active grid for a scene or session.
//!
//! A scene holds at most one grid at a time. Installing a new grid replaces
//! the old one wholesale; readers that already hold an `Arc<Grid>` keep a
//! consistent snapshot until they drop it.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::map::Grid;

/// The grid currently in use by one scene.
#[derive(Debug, Default)]
pub struct NavScene {
    active: RwLock<Option<Arc<Grid>>>,
}

impl NavScene {
    /// Creates a scene with no grid installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `grid` the active grid, returning the one it replaced.
    pub fn install(&self, grid: Grid) -> Option<Arc<Grid>> {
        let grid = Arc::new(grid);
        let previous = self.active.write().replace(Arc::clone(&grid));
        match &previous {
            Some(old) => warn!(
                old_columns = old.columns(),
                old_rows = old.rows(),
                new_columns = grid.columns(),
                new_rows = grid.rows(),
                "Another grid was already active, replacing it"
            ),
            None => info!(columns = grid.columns(), rows = grid.rows(), "Grid installed"),
        }
        previous
    }

    /// Snapshot of the active grid, if any.
    pub fn current(&self) -> Option<Arc<Grid>> {
        self.active.read().clone()
    }

    /// Removes the active grid.
    pub fn clear(&self) -> Option<Arc<Grid>> {
        self.active.write().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{GridConfig, WorldPoint};
    use crate::obstacle::Obstacle;

    fn grid(width: f32) -> Grid {
        Grid::new(GridConfig::new(width, 4.0, 1.0), &Vec::<Obstacle>::new()).unwrap()
    }

    #[test]
    fn test_install_replaces_previous_grid() {
        let scene = NavScene::new();
        assert!(scene.current().is_none());

        assert!(scene.install(grid(4.0)).is_none());
        let snapshot = scene.current().unwrap();
        assert_eq!(snapshot.columns(), 4);

        let replaced = scene.install(grid(6.0)).unwrap();
        assert!(Arc::ptr_eq(&replaced, &snapshot));
        assert_eq!(scene.current().unwrap().columns(), 6);

        // Earlier readers still see the grid they started with.
        assert_eq!(snapshot.columns(), 4);
        assert!(snapshot.cell_at(WorldPoint::new(1.5, 0.0)).is_some());
    }

    #[test]
    fn test_clear() {
        let scene = NavScene::new();
        scene.install(grid(4.0));
        assert!(scene.clear().is_some());
        assert!(scene.current().is_none());
        assert!(scene.clear().is_none());
    }

    #[test]
    fn test_concurrent_readers() {
        let scene = Arc::new(NavScene::new());
        scene.install(grid(8.0));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let scene = Arc::clone(&scene);
                std::thread::spawn(move || {
                    let grid = scene.current().unwrap();
                    let x = -3.5 + i as f32;
                    grid.find_path(WorldPoint::new(x, -1.5), WorldPoint::new(3.5, 1.5))
                        .map(|p| p.len())
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
    }
}
