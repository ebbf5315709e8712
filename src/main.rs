mod settings;

use anyhow::Context;
use pathgrid_navigation::{AStarSearch, Grid, NavScene, Obstacle, WorldPoint};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use settings::{DEFAULT_CONFIG_PATH, ObstacleSettings};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let settings = settings::load_settings(&path)
        .with_context(|| format!("failed to load settings from {path}"))?;

    let obstacles: Vec<Obstacle> = settings
        .obstacles
        .iter()
        .map(ObstacleSettings::to_obstacle)
        .collect();

    let scene = NavScene::new();
    let grid = Grid::with_search(settings.grid, &obstacles, AStarSearch::new(settings.heuristic))
        .context("failed to build navigation grid")?;
    scene.install(grid);
    let grid = scene.current().context("no grid installed")?;

    info!(
        walkable = grid.walkable_count(),
        blocked = grid.blocked_count(),
        "Navigation grid ready"
    );
    println!("{grid}");

    for route in &settings.routes {
        let start = WorldPoint::from(route.start);
        let goal = WorldPoint::from(route.goal);
        match grid.find_path(start, goal) {
            Ok(path) => {
                info!(?start, ?goal, "{}", path);
                let waypoints: Vec<String> = path
                    .waypoints
                    .iter()
                    .map(|w| format!("({:.1}, {:.1})", w.x, w.y))
                    .collect();
                println!("{} -> {}: {}", fmt_point(&start), fmt_point(&goal), waypoints.join(" "));
            }
            Err(reason) => {
                warn!(?start, ?goal, %reason, "Route unreachable");
                println!("{} -> {}: unreachable ({reason})", fmt_point(&start), fmt_point(&goal));
            }
        }
    }

    Ok(())
}

fn fmt_point(p: &WorldPoint) -> String {
    format!("({:.1}, {:.1})", p.x, p.y)
}
