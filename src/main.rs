//! CLI for grid path finding

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use gridpath::{Algorithm, Config, Grid, LayoutMode, MazeGenerator, Point, SearchOutcome};
use log::info;

/// Shortest path through a randomly carved grid
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Grid height
    #[arg(long, default_value_t = 100)]
    rows: usize,

    /// Grid width
    #[arg(long, default_value_t = 100)]
    cols: usize,

    /// Chance in percent that a carved cell opens
    #[arg(short, long, default_value_t = 54)]
    open_probability: u32,

    /// Smallest cell weight
    #[arg(long, default_value_t = 1)]
    min_weight: u32,

    /// Largest cell weight
    #[arg(long, default_value_t = 1)]
    max_weight: u32,

    /// Search algorithm
    #[arg(short, long, value_enum, default_value_t = Algorithm::Astar)]
    algorithm: Algorithm,

    /// How the open area is generated
    #[arg(short, long, value_enum, default_value_t = LayoutMode::Carve)]
    layout: LayoutMode,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Start cell as `row,col`
    #[arg(long)]
    start: Option<Point>,

    /// Goal cell as `row,col`
    #[arg(long)]
    goal: Option<Point>,

    /// Give up after expanding this many cells
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Only print the grid, do not search
    #[arg(long)]
    no_search: bool,

    /// Print the grid with emojis
    #[arg(short, long)]
    emoji: bool,

    /// File to read the grid from instead of generating one. Use `-` for stdin.
    file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            rows: self.rows,
            cols: self.cols,
            open_probability: self.open_probability,
            min_weight: self.min_weight,
            max_weight: self.max_weight,
            algorithm: self.algorithm,
            layout: self.layout,
            seed: self.seed,
            start: self.start,
            goal: self.goal,
            max_expansions: self.max_expansions,
        }
    }
}

fn read_grid(file: &Path) -> anyhow::Result<Grid> {
    let layout = if file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(file).with_context(|| format!("Cannot read {}", file.display()))?
    };
    Ok(Grid::parse_layout(layout.trim())?)
}

/// Build or read a grid, search it and print the result
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.config();

    let (mut grid, start, goal) = if let Some(file) = &args.file {
        let grid = read_grid(file)?;
        let start = args
            .start
            .or(grid.start())
            .context("Layout has no start cell, pass --start")?;
        let goal = args
            .goal
            .or(grid.goal())
            .context("Layout has no goal cell, pass --goal")?;
        (grid, start, goal)
    } else {
        let grid = MazeGenerator::new(config.seed)
            .generate(&config)
            .context("Cannot generate grid")?;
        (grid, config.start_point(), config.goal_point())
    };

    let result = if args.no_search {
        None
    } else {
        let (report, path) =
            grid.shortest_path_with_limit(start, goal, config.algorithm, config.max_expansions)?;
        info!("path of {} cells", path.len());
        Some((report, path))
    };

    if args.emoji {
        println!("{}", grid.to_emojis());
    } else {
        println!("{grid}");
    }

    if let Some((report, path)) = result {
        match report.outcome {
            SearchOutcome::Reached { cost } => println!(
                "{:?}: path from {start} to {goal} is {} steps, costs {cost}, {} cells expanded.",
                report.algorithm,
                path.len().saturating_sub(1),
                report.expanded
            ),
            SearchOutcome::Unreachable => println!(
                "{:?}: {goal} is unreachable from {start}, {} cells expanded.",
                report.algorithm, report.expanded
            ),
            SearchOutcome::LimitExceeded => println!(
                "{:?}: gave up after {} expansions.",
                report.algorithm, report.expanded
            ),
        }
    }
    Ok(())
}
