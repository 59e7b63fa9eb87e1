//! CLI for grid generation

use anyhow::Context;
use clap::Parser;
use gridpath::{Config, LayoutMode, MazeGenerator};

/// Grid generator whose output `find-path` reads back
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generated grid height
    #[arg(long, default_value_t = 19)]
    rows: usize,

    /// Generated grid width
    #[arg(long, default_value_t = 15)]
    cols: usize,

    /// Chance in percent that a carved cell opens
    #[arg(short, long, default_value_t = 54)]
    open_probability: u32,

    /// Largest cell weight, at most 9 to survive the text layout
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=9))]
    max_weight: u32,

    /// How the open area is generated
    #[arg(short, long, value_enum, default_value_t = LayoutMode::Carve)]
    layout: LayoutMode,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print with emojis
    #[arg(short, long)]
    emoji: bool,
}

/// Generate a grid, print it
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = Config {
        rows: args.rows,
        cols: args.cols,
        open_probability: args.open_probability,
        max_weight: args.max_weight,
        layout: args.layout,
        seed: args.seed,
        ..Config::default()
    };
    let grid = MazeGenerator::new(config.seed)
        .generate(&config)
        .context("Cannot generate grid")?;

    if args.emoji {
        println!("{}", grid.to_emojis());
    } else {
        println!("{grid}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::Args;

    #[test]
    fn max_weight_must_fit_one_digit() {
        assert!(Args::try_parse_from(["generate-grid", "--max-weight", "9"]).is_ok());
        assert!(Args::try_parse_from(["generate-grid", "--max-weight", "10"]).is_err());
        assert!(Args::try_parse_from(["generate-grid", "--max-weight", "0"]).is_err());
    }
}
