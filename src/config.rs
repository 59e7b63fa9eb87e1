//! Generation and search settings

use clap::ValueEnum;

use crate::error::GridError;
use crate::grid::{cell_count, Point};
use crate::maze_generator::{check_probability, check_weights};
use crate::search::Algorithm;

/// How the open area of a generated grid is laid out
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LayoutMode {
    /// Start from solid rock and carve a connected region from the start
    Carve,
    /// Wall the border and scatter walls at random over an open interior
    Scatter,
}

/// Everything needed to generate a grid and search it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    /// Chance, in percent, that a carved neighbor opens. For
    /// [LayoutMode::Scatter], cells are walls with the complementary chance.
    pub open_probability: u32,
    pub min_weight: u32,
    pub max_weight: u32,
    pub algorithm: Algorithm,
    pub layout: LayoutMode,
    /// Seed for reproducible grids; entropy when unset
    pub seed: Option<u64>,
    /// Defaults to `(1, 1)`, clamped into the grid
    pub start: Option<Point>,
    /// Defaults to `(rows - 2, cols - 2)`, clamped into the grid
    pub goal: Option<Point>,
    /// Give up a search after this many expanded cells
    pub max_expansions: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 100,
            open_probability: 54,
            min_weight: 1,
            max_weight: 1,
            algorithm: Algorithm::Astar,
            layout: LayoutMode::Carve,
            seed: None,
            start: None,
            goal: None,
            max_expansions: None,
        }
    }
}

impl Config {
    /// Check dimensions, probability, weight range and endpoints.
    pub fn validate(&self) -> Result<(), GridError> {
        cell_count(self.rows, self.cols)?;
        check_probability(self.open_probability)?;
        check_weights(self.min_weight, self.max_weight)?;

        for point in [self.start_point(), self.goal_point()] {
            if point.row >= self.rows || point.col >= self.cols {
                return Err(GridError::InvalidEndpoint {
                    point,
                    reason: "out of bounds",
                });
            }
        }
        Ok(())
    }

    pub fn start_point(&self) -> Point {
        self.start.unwrap_or(Point::new(
            1.min(self.rows.saturating_sub(1)),
            1.min(self.cols.saturating_sub(1)),
        ))
    }

    pub fn goal_point(&self) -> Point {
        self.goal.unwrap_or(Point::new(
            self.rows.saturating_sub(2),
            self.cols.saturating_sub(2),
        ))
    }
}
