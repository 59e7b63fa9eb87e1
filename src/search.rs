//! Shortest-path search over a grid
//!
//! Dijkstra and A* share one frontier/relaxation routine; they differ only in
//! the frontier key. Dijkstra orders by the running cost `g`, A* by
//! `g + h` with `h` the Euclidean distance to the goal.
//!
//! Stepping onto a cell costs its weight, and weights are at least 1, so a
//! 4-directional path between two cells costs at least their Manhattan
//! distance, which is never below their Euclidean distance. The heuristic is
//! therefore admissible. It is also consistent: neighbors differ by at most
//! 1 in Euclidean distance to the goal, and each step costs at least 1.
//! Both properties depend on the minimum weight being 1 or more.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use clap::ValueEnum;
use log::{debug, warn};

use crate::error::GridError;
use crate::grid::{Grid, Point};

/// Search strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Uniform-cost search
    Dijkstra,
    /// Heuristic search guided by Euclidean distance
    Astar,
}

impl Algorithm {
    /// Estimated remaining cost from `from` to `goal`
    pub fn estimate(self, from: Point, goal: Point) -> f64 {
        match self {
            Algorithm::Dijkstra => 0.0,
            Algorithm::Astar => euclidean(from, goal),
        }
    }
}

/// Straight-line distance between two grid coordinates
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dr = a.row.abs_diff(b.row) as f64;
    let dc = a.col.abs_diff(b.col) as f64;
    dr.hypot(dc)
}

/// How a search run ended
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SearchOutcome {
    /// Goal popped from the frontier with its final cost
    Reached { cost: u64 },
    /// Frontier exhausted without reaching the goal
    Unreachable,
    /// Expansion limit hit first. Costs and parents found so far remain a
    /// valid partial relaxation.
    LimitExceeded,
}

/// Result of one search run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchReport {
    pub algorithm: Algorithm,
    pub outcome: SearchOutcome,
    /// Cells closed (popped and relaxed) during the run
    pub expanded: usize,
}

impl SearchReport {
    pub fn reached(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Reached { .. })
    }

    pub fn cost(&self) -> Option<u64> {
        match self.outcome {
            SearchOutcome::Reached { cost } => Some(cost),
            _ => None,
        }
    }
}

/// Frontier entry, ordered by key for use in `BinaryHeap`.
///
/// The same cell may be queued several times at different keys; only the
/// entry matching the cell's live key is processed.
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    index: usize,
    key: f64,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest key first.
        other.key.total_cmp(&self.key)
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Grid {
    /// Find the cheapest path cost from `start` to `goal`.
    ///
    /// Resets all search scratch first, then leaves best costs and parent
    /// links in the cells for [Grid::reconstruct]. An unreachable goal is
    /// reported in the outcome, not as an error.
    ///
    /// Returns [GridError::InvalidEndpoint] if either endpoint is out of
    /// bounds or a wall.
    pub fn search(
        &mut self,
        start: Point,
        goal: Point,
        algorithm: Algorithm,
    ) -> Result<SearchReport, GridError> {
        self.search_with_limit(start, goal, algorithm, None)
    }

    /// [Grid::search], giving up after `max_expansions` closed cells.
    pub fn search_with_limit(
        &mut self,
        start: Point,
        goal: Point,
        algorithm: Algorithm,
        max_expansions: Option<usize>,
    ) -> Result<SearchReport, GridError> {
        let start_idx = self.open_endpoint(start)?;
        let goal_idx = self.open_endpoint(goal)?;

        self.reset_scratch();
        {
            let cell = &mut self.cells[start_idx];
            cell.best_cost = 0;
            cell.estimated_total_cost = algorithm.estimate(start, goal);
        }

        let key = |cost: u64, total: f64| match algorithm {
            Algorithm::Dijkstra => cost as f64,
            Algorithm::Astar => total,
        };

        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry {
            index: start_idx,
            key: key(0, self.cells[start_idx].estimated_total_cost),
        });

        let mut expanded = 0;
        let outcome = loop {
            let Some(FrontierEntry { index, key: popped }) = frontier.pop() else {
                break SearchOutcome::Unreachable;
            };

            let current = &self.cells[index];
            // Skip stale duplicates
            if current.closed || popped > key(current.best_cost, current.estimated_total_cost) {
                continue;
            }
            if index == goal_idx {
                break SearchOutcome::Reached {
                    cost: current.best_cost,
                };
            }
            if max_expansions.is_some_and(|limit| expanded >= limit) {
                break SearchOutcome::LimitExceeded;
            }

            let current_cost = current.best_cost;
            self.cells[index].closed = true;
            expanded += 1;

            for next in self.neighbor_indices(index) {
                let point = self.point(next);
                let cell = &mut self.cells[next];
                if cell.is_wall || cell.closed {
                    continue;
                }
                let candidate = current_cost.saturating_add(u64::from(cell.weight));
                if candidate < cell.best_cost {
                    cell.best_cost = candidate;
                    cell.estimated_total_cost = candidate as f64 + algorithm.estimate(point, goal);
                    cell.parent = Some(index);
                    frontier.push(FrontierEntry {
                        index: next,
                        key: key(candidate, cell.estimated_total_cost),
                    });
                }
            }
        };

        match outcome {
            SearchOutcome::LimitExceeded => {
                warn!("{algorithm:?} search from {start} gave up after {expanded} expansions")
            }
            _ => debug!(
                "{algorithm:?} search from {start} to {goal}: {outcome:?}, {expanded} expansions"
            ),
        }

        Ok(SearchReport {
            algorithm,
            outcome,
            expanded,
        })
    }

    fn open_endpoint(&self, point: Point) -> Result<usize, GridError> {
        let index = self.endpoint_index(point)?;
        if self.cells[index].is_wall {
            return Err(GridError::InvalidEndpoint {
                point,
                reason: "cell is a wall",
            });
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::FrontierEntry;
    use crate::{
        maze_generator::MazeGenerator, Algorithm, Config, Grid, GridError, Point, SearchOutcome,
    };

    const ALGORITHMS: [Algorithm; 2] = [Algorithm::Dijkstra, Algorithm::Astar];

    #[test]
    fn routes_through_the_gap() {
        let mut grid = Grid::parse_layout(
            "
S.#.E
..#..
..#..
..#..
....."
                .trim(),
        )
        .unwrap();
        for algorithm in ALGORITHMS {
            let report = grid
                .search(Point::new(0, 0), Point::new(0, 4), algorithm)
                .unwrap();
            assert_eq!(report.cost(), Some(12), "{algorithm:?}");
            let path = grid.reconstruct(Point::new(0, 4));
            assert!(path.contains(&Point::new(4, 2)));
            assert_eq!(path.len(), 13);
        }
    }

    #[test]
    fn same_cell_costs_nothing() {
        let mut grid = Grid::new(3, 3, false).unwrap();
        for algorithm in ALGORITHMS {
            let report = grid
                .search(Point::new(1, 1), Point::new(1, 1), algorithm)
                .unwrap();
            assert_eq!(report.outcome, SearchOutcome::Reached { cost: 0 });
            assert_eq!(report.expanded, 0);
            assert_eq!(grid.reconstruct(Point::new(1, 1)), vec![Point::new(1, 1)]);
        }
    }

    #[test]
    fn isolated_goal_is_unreachable() {
        let mut grid = Grid::parse_layout(
            "
S....
...#.
..#E#
...#.
....."
                .trim(),
        )
        .unwrap();
        for algorithm in ALGORITHMS {
            let report = grid
                .search(Point::new(0, 0), Point::new(2, 3), algorithm)
                .unwrap();
            assert_eq!(report.outcome, SearchOutcome::Unreachable);
            assert!(!report.reached());
            assert!(grid.reconstruct(Point::new(2, 3)).is_empty());
        }
    }

    #[test]
    fn walled_or_outside_endpoints_fail_fast() {
        let mut grid = Grid::parse_layout("S#\n..").unwrap();
        assert!(matches!(
            grid.search(Point::new(0, 0), Point::new(0, 1), Algorithm::Astar),
            Err(GridError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            grid.search(Point::new(0, 0), Point::new(5, 5), Algorithm::Dijkstra),
            Err(GridError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn weights_steer_the_path() {
        // Straight route costs 9 + 1 + 1; the detour below costs 5.
        let mut grid = Grid::parse_layout(
            "
S9.E
....
#..."
                .trim(),
        )
        .unwrap();
        for algorithm in ALGORITHMS {
            let report = grid
                .search(Point::new(0, 0), Point::new(0, 3), algorithm)
                .unwrap();
            assert_eq!(report.cost(), Some(5), "{algorithm:?}");
            let path = grid.reconstruct(Point::new(0, 3));
            assert!(!path.contains(&Point::new(0, 1)));
        }
    }

    #[test]
    fn frontier_pops_smallest_key_first() {
        let mut frontier = BinaryHeap::new();
        for (index, key) in [(0, 3.5), (1, 1.0), (2, f64::INFINITY), (3, 2.0)] {
            frontier.push(FrontierEntry { index, key });
        }
        let order: Vec<usize> = std::iter::from_fn(|| frontier.pop().map(|e| e.index)).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn dijkstra_and_astar_agree() {
        for seed in 0..30 {
            let config = Config {
                rows: 25,
                cols: 30,
                max_weight: if seed % 2 == 0 { 1 } else { 9 },
                seed: Some(seed),
                ..Config::default()
            };
            let mut grid = MazeGenerator::new(config.seed).generate(&config).unwrap();
            let (start, goal) = (config.start_point(), config.goal_point());

            let dijkstra = grid.search(start, goal, Algorithm::Dijkstra).unwrap();
            let astar = grid.search(start, goal, Algorithm::Astar).unwrap();
            assert_eq!(dijkstra.cost(), astar.cost(), "seed {seed}");
            assert!(astar.expanded <= dijkstra.expanded, "seed {seed}");
        }
    }

    #[test]
    fn repeated_search_is_idempotent() {
        let config = Config {
            rows: 40,
            cols: 40,
            open_probability: 70,
            max_weight: 5,
            seed: Some(11),
            ..Config::default()
        };
        let mut grid = MazeGenerator::new(config.seed).generate(&config).unwrap();
        let (start, goal) = (config.start_point(), config.goal_point());

        for algorithm in ALGORITHMS {
            let first = grid.search(start, goal, algorithm).unwrap();
            let first_path = grid.reconstruct(goal);
            let first_grid = grid.clone();

            let second = grid.search(start, goal, algorithm).unwrap();
            let second_path = grid.reconstruct(goal);
            assert_eq!(first, second);
            assert_eq!(first_path, second_path);
            assert_eq!(first_grid, grid);
        }
    }

    #[test]
    fn limit_aborts_with_consistent_partial_state() {
        let mut grid = Grid::new(30, 30, false).unwrap();
        let mut random = StdRng::seed_from_u64(9);
        for row in 0..30 {
            for col in 0..30 {
                grid.set_weight(Point::new(row, col), random.gen_range(1..=4))
                    .unwrap();
            }
        }
        let (start, goal) = (Point::new(0, 0), Point::new(29, 29));
        let report = grid
            .search_with_limit(start, goal, Algorithm::Dijkstra, Some(25))
            .unwrap();
        assert_eq!(report.outcome, SearchOutcome::LimitExceeded);
        assert_eq!(report.expanded, 25);

        // Every reached cell's cost is its parent's cost plus its own weight.
        for (p, cell) in grid.cells() {
            match (cell.best_cost(), grid.parent_of(p)) {
                (Some(0), None) => assert_eq!(p, start),
                (Some(cost), Some(parent)) => {
                    let parent_cost = grid.cell(parent).unwrap().best_cost().unwrap();
                    assert_eq!(cost, parent_cost + u64::from(cell.weight()));
                }
                (None, None) => (),
                other => panic!("inconsistent cell {p}: {other:?}"),
            }
        }

        let full = grid.search(start, goal, Algorithm::Dijkstra).unwrap();
        assert!(full.reached());
    }
}
