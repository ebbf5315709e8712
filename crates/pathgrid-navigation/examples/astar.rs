use nalgebra::Vector2;
use pathgrid_navigation::{Grid, GridConfig, GridPoint, Obstacle, WorldPoint};
use rand::Rng;
use std::collections::HashSet;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // A 40x24 area with 2m cells, diagonals allowed
    let config = GridConfig::new(40.0, 24.0, 2.0).with_corner_cutting(true);

    // Scatter random crates; their pivots and footprints are rasterized onto the grid
    let mut rng = rand::rng();
    let num_obstacles = 25;
    println!("Generating {} random obstacles...", num_obstacles);
    let obstacles: Vec<Obstacle> = (0..num_obstacles)
        .map(|_| {
            let position = WorldPoint::new(rng.random_range(-20.0..20.0), rng.random_range(-12.0..12.0));
            let size = Vector2::new(rng.random_range(0.5..4.0), rng.random_range(0.5..4.0));
            Obstacle::centered(position, size, 0)
        })
        .collect();

    let grid = Grid::new(config, &obstacles)?;
    println!("{}", grid);
    println!(
        "{} of {} cells blocked",
        grid.blocked_count(),
        grid.len()
    );

    let start = WorldPoint::new(-19.0, -11.0);
    let goal = WorldPoint::new(19.0, 11.0);

    match grid.find_path(start, goal) {
        Ok(path) => {
            println!("\n{}", path);
            let on_path: HashSet<GridPoint> = path
                .cells
                .iter()
                .filter_map(|id| grid.cell_by_id(*id))
                .map(|cell| cell.coords())
                .collect();
            print_grid_with_path(&grid, &on_path);
        }
        Err(reason) => println!("\nNo path found: {}", reason),
    }

    Ok(())
}

fn print_grid_with_path(grid: &Grid, path: &HashSet<GridPoint>) {
    // Print from top to bottom (reverse y order for visual clarity)
    for y in (0..grid.rows()).rev() {
        print!("{:2} ", y);
        for x in 0..grid.columns() {
            let p = GridPoint::new(x, y);
            let glyph = match grid.cell(p) {
                Some(cell) if cell.is_blocked() => '#',
                _ if path.contains(&p) => '*',
                _ => '.',
            };
            print!("{} ", glyph);
        }
        println!();
    }
}
