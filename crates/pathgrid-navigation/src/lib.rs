#![warn(missing_docs)]
#![doc = "A navigable cell grid for agents moving over terrain with static obstructions."]
#![doc = ""]
#![doc = "A [`Grid`] is built once from a [`GridConfig`] and an [`ObstacleSource`]: cells are laid"]
#![doc = "out over the configured area, obstacles are rasterized onto them, and a neighbor graph"]
#![doc = "is derived. The finished grid answers `cell_at`, `nearest_walkable` and `find_path`"]
#![doc = "queries; path search is delegated to the [`PathSearch`] strategy the grid owns."]

pub mod astar;
pub mod error;
pub mod map;
pub mod obstacle;
pub mod scene;
pub mod search;

pub use astar::{AStarSearch, Heuristic};
pub use error::{NavigationError, NavigationResult};
pub use map::{Aabb, Cell, CellId, Grid, GridConfig, GridPoint, WorldPoint};
pub use obstacle::{LayerMask, Obstacle, ObstacleSource};
pub use scene::NavScene;
pub use search::{Path, PathSearch, Unreachable};
