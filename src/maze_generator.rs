//! Map generation

use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::config::{Config, LayoutMode};
use crate::error::GridError;
use crate::grid::{Grid, Point};

/// Random grid generator.
///
/// All randomness comes from the owned generator, so a seeded generator
/// reproduces the same grids.
pub struct MazeGenerator {
    random: StdRng,
}

/// Pending work for one cell of the carving walk
struct Frame {
    /// Neighbor indices not yet tried, in shuffled order
    pending: Vec<usize>,
}

impl MazeGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Generate a grid as described by `config`.
    ///
    /// The configuration is validated first. Start and goal are always open
    /// afterwards, but the goal is only reachable if the layout connects it.
    pub fn generate(&mut self, config: &Config) -> Result<Grid, GridError> {
        config.validate()?;
        let start = config.start_point();
        let goal = config.goal_point();

        let mut grid = match config.layout {
            LayoutMode::Carve => {
                let mut grid = Grid::new(config.rows, config.cols, true)?;
                self.carve(&mut grid, start, config.open_probability)?;
                grid
            }
            LayoutMode::Scatter => {
                let mut grid = Grid::new(config.rows, config.cols, false)?;
                self.scatter_walls(&mut grid, 100 - config.open_probability)?;
                grid
            }
        };
        self.assign_weights(&mut grid, config.min_weight, config.max_weight)?;
        grid.set_start(start)?;
        grid.set_goal(goal)?;

        info!(
            "generated {}x{} {:?} grid with {} open cells",
            config.rows,
            config.cols,
            config.layout,
            grid.open_count()
        );
        Ok(grid)
    }

    /// Grow an open region from `start` by randomized depth-first carving.
    ///
    /// The seed cell is opened, then every walled neighbor of an expanding
    /// cell is opened with probability `open_probability / 100` and expanded
    /// in turn. A cell is expanded only when it flips from wall to open, so
    /// each cell expands at most once. The walk keeps its own stack instead
    /// of recursing, so grid size does not limit depth.
    ///
    /// Returns the number of cells opened, including the seed.
    pub fn carve(
        &mut self,
        grid: &mut Grid,
        start: Point,
        open_probability: u32,
    ) -> Result<usize, GridError> {
        check_probability(open_probability)?;
        let start_idx = grid.endpoint_index(start)?;

        let mut opened = 0;
        if grid.cells[start_idx].is_wall {
            grid.cells[start_idx].is_wall = false;
            opened += 1;
        }

        let mut stack = vec![self.frame(grid, start_idx)];
        while let Some(frame) = stack.last_mut() {
            let Some(next) = frame.pending.pop() else {
                stack.pop();
                continue;
            };
            if grid.cells[next].is_wall && self.random.gen_ratio(open_probability, 100) {
                grid.cells[next].is_wall = false;
                opened += 1;
                let frame = self.frame(grid, next);
                stack.push(frame);
            }
        }

        debug!("carved {opened} cells from {start}");
        Ok(opened)
    }

    fn frame(&mut self, grid: &Grid, index: usize) -> Frame {
        let mut pending: Vec<usize> = grid.neighbor_indices(index).collect();
        pending.shuffle(&mut self.random);
        Frame { pending }
    }

    /// Wall the border and scatter walls over the interior.
    ///
    /// Each interior cell becomes a wall with probability
    /// `wall_probability / 100`; existing walls are kept. Returns the number
    /// of walls placed.
    pub fn scatter_walls(
        &mut self,
        grid: &mut Grid,
        wall_probability: u32,
    ) -> Result<usize, GridError> {
        check_probability(wall_probability)?;
        let (rows, cols) = (grid.rows(), grid.cols());

        let mut placed = 0;
        for (i, cell) in grid.cells.iter_mut().enumerate() {
            let (row, col) = (i / cols, i % cols);
            let border = row == 0 || col == 0 || row == rows - 1 || col == cols - 1;
            if !cell.is_wall && (border || self.random.gen_ratio(wall_probability, 100)) {
                cell.is_wall = true;
                placed += 1;
            }
        }

        debug!("scattered {placed} walls");
        Ok(placed)
    }

    /// Draw every cell's weight uniformly from `min..=max`.
    pub fn assign_weights(&mut self, grid: &mut Grid, min: u32, max: u32) -> Result<(), GridError> {
        check_weights(min, max)?;
        for cell in grid.cells.iter_mut() {
            cell.weight = self.random.gen_range(min..=max);
        }
        Ok(())
    }
}

pub(crate) fn check_probability(probability: u32) -> Result<(), GridError> {
    if probability > 100 {
        return Err(GridError::Configuration(format!(
            "probability must be within 0..=100, got {probability}"
        )));
    }
    Ok(())
}

pub(crate) fn check_weights(min: u32, max: u32) -> Result<(), GridError> {
    if min == 0 || min > max {
        return Err(GridError::Configuration(format!(
            "weight range must satisfy 1 <= min <= max, got {min}..={max}"
        )));
    }
    Ok(())
}
