use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use brickwork::{Config, House, WallShape};

#[derive(Parser)]
#[command(name = "brickwork")]
#[command(author, version, about = "Builds a procedural brick house")]
struct Args {
    /// TOML file to read settings from
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Seed for the brick roughening noise
    #[arg(long)]
    seed: Option<u64>,

    /// How walls are laid out
    #[arg(long, value_enum)]
    shape: Option<Shape>,

    /// Number of brick rows in the main walls
    #[arg(long, short = 'r')]
    rows: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Shape {
    Single,
    Circle,
    Square,
}

impl From<Shape> for WallShape {
    fn from(value: Shape) -> Self {
        match value {
            Shape::Single => WallShape::Single,
            Shape::Circle => WallShape::Circle,
            Shape::Square => WallShape::Square,
        }
    }
}

fn main() -> Result<(), brickwork::Error> {
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(shape) = args.shape {
        config.layout.shape = shape.into();
    }
    if let Some(rows) = args.rows {
        config.layout.rows = rows;
    }

    let house = House::new(config);
    let snapshot = house.scene().snapshot();

    log::info!(
        "{} draws, {} vertices uploaded, {} triangles drawn",
        snapshot.draws.len(),
        snapshot.vertices.len(),
        snapshot.triangle_count(),
    );
    println!(
        "brick: {} triangles, {} instances; mortar: {} boxes{}",
        house.brick.triangle_count(),
        house.layout.bricks.len(),
        house.layout.mortar.len(),
        if house.layout.mortar_ring.is_some() { " and a ring" } else { "" },
    );

    Ok(())
}
