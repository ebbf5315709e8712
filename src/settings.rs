use config::{Config, ConfigError, Environment, File, FileFormat};
use nalgebra::Vector2;
use pathgrid_navigation::{GridConfig, Heuristic, Obstacle, WorldPoint};
use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Everything the demo needs: the grid to build, what stands on it, and which routes to plan.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid: GridConfig,
    pub heuristic: Heuristic,
    pub obstacles: Vec<ObstacleSettings>,
    pub routes: Vec<RouteSettings>,
}

/// An obstacle footprint centered on its pivot.
#[derive(Debug, Clone, Deserialize)]
pub struct ObstacleSettings {
    pub position: [f32; 2],
    pub size: [f32; 2],
    #[serde(default)]
    pub layer: u8,
}

impl ObstacleSettings {
    pub fn to_obstacle(&self) -> Obstacle {
        Obstacle::centered(
            WorldPoint::from(self.position),
            Vector2::from(self.size),
            self.layer,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteSettings {
    pub start: [f32; 2],
    pub goal: [f32; 2],
}

/// Loads settings from `path`, with `PATHGRID__SECTION__KEY` environment variables taking precedence.
pub fn load_settings(path: &str) -> Result<Settings, ConfigError> {
    info!("Attempting to load configuration from {}", path);

    let settings = Config::builder()
        .add_source(File::new(path, FileFormat::Toml).required(true))
        .add_source(
            Environment::with_prefix("PATHGRID")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .and_then(Config::try_deserialize::<Settings>);

    match settings {
        Ok(settings) => {
            info!(
                obstacles = settings.obstacles.len(),
                routes = settings.routes.len(),
                "Successfully loaded configuration: {:?}",
                settings.grid
            );
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_toml() {
        let source = r#"
            heuristic = "manhattan"

            [grid]
            width = 20.0
            depth = 10.0
            cell_size = 1.0
            allow_corner_cutting = true
            obstacle_mask = 1

            [[obstacles]]
            position = [0.0, 0.0]
            size = [2.0, 1.0]

            [[routes]]
            start = [-9.5, -4.5]
            goal = [9.5, 4.5]
        "#;
        let settings: Settings = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .and_then(Config::try_deserialize)
            .unwrap();

        assert_eq!(settings.grid.width, 20.0);
        assert!(settings.grid.allow_corner_cutting);
        assert_eq!(settings.grid.obstacle_mask.0, 1);
        assert_eq!(settings.heuristic, Heuristic::Manhattan);
        assert_eq!(settings.routes.len(), 1);

        let obstacle = settings.obstacles[0].to_obstacle();
        assert_eq!(obstacle.layer, 0);
        assert_eq!(obstacle.bounds.min, WorldPoint::new(-1.0, -0.5));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str("", FileFormat::Toml))
            .build()
            .and_then(Config::try_deserialize)
            .unwrap();
        assert_eq!(settings.grid, GridConfig::default());
        assert_eq!(settings.heuristic, Heuristic::Euclidean);
        assert!(settings.obstacles.is_empty());
    }
}
