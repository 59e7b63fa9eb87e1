//! Path reconstruction from search parent links

use crate::error::GridError;
use crate::grid::{Grid, Point};
use crate::search::{Algorithm, SearchReport};

impl Grid {
    /// Walk parent links back from `goal` and return the path start-first.
    ///
    /// Every cell on the returned path gets its `on_path` flag set. The path
    /// is empty when the chain from `goal` does not lead back to the last
    /// search's start, e.g. when the goal was never reached. When start and
    /// goal coincide the path is that single cell.
    pub fn reconstruct(&mut self, goal: Point) -> Vec<Point> {
        let Some(goal_idx) = self.index(goal) else {
            return Vec::new();
        };

        // Parent links form a forest, so the walk visits each cell at most once.
        let mut chain = vec![goal_idx];
        let mut current = goal_idx;
        while let Some(parent) = self.cells[current].parent {
            if chain.len() >= self.cells.len() {
                return Vec::new();
            }
            chain.push(parent);
            current = parent;
        }

        // Only the search's start has cost 0; weights are at least 1.
        if self.cells[current].best_cost != 0 {
            return Vec::new();
        }

        for &i in &chain {
            self.cells[i].on_path = true;
        }
        chain.into_iter().rev().map(|i| self.point(i)).collect()
    }

    /// Search from `start` to `goal` and reconstruct the path.
    ///
    /// # Examples
    /// ```
    /// use gridpath::{Algorithm, Grid, Point};
    ///
    /// let mut grid = Grid::parse_layout("S.#\n..E").unwrap();
    /// let (report, path) = grid
    ///     .shortest_path(Point::new(0, 0), Point::new(1, 2), Algorithm::Dijkstra)
    ///     .unwrap();
    /// assert_eq!(report.cost(), Some(3));
    /// assert_eq!(path.len(), 4);
    /// ```
    pub fn shortest_path(
        &mut self,
        start: Point,
        goal: Point,
        algorithm: Algorithm,
    ) -> Result<(SearchReport, Vec<Point>), GridError> {
        self.shortest_path_with_limit(start, goal, algorithm, None)
    }

    /// [Grid::shortest_path] with an expansion limit.
    ///
    /// A search that gives up is treated like an unreachable goal: the path
    /// is empty and no cell is marked, even if the goal already has a parent.
    pub fn shortest_path_with_limit(
        &mut self,
        start: Point,
        goal: Point,
        algorithm: Algorithm,
        max_expansions: Option<usize>,
    ) -> Result<(SearchReport, Vec<Point>), GridError> {
        let report = self.search_with_limit(start, goal, algorithm, max_expansions)?;
        let path = if report.reached() {
            self.reconstruct(goal)
        } else {
            Vec::new()
        };
        Ok((report, path))
    }

    /// Sum of weights entered along `path`, skipping the first cell
    pub fn path_cost(&self, path: &[Point]) -> Option<u64> {
        path.iter().skip(1).try_fold(0u64, |total, &p| {
            Some(total + u64::from(self.cell(p)?.weight))
        })
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{Algorithm, Grid, Point, SearchOutcome};

    #[test]
    fn path_runs_start_to_goal_and_marks_cells() {
        let mut grid = Grid::parse_layout(
            "
S#...
.#.#.
...#E"
                .trim(),
        )
        .unwrap();
        let (report, path) = grid
            .shortest_path(Point::new(0, 0), Point::new(2, 4), Algorithm::Astar)
            .unwrap();

        assert_eq!(path.first(), Some(&Point::new(0, 0)));
        assert_eq!(path.last(), Some(&Point::new(2, 4)));
        assert_eq!(report.cost(), grid.path_cost(&path));
        for (a, b) in path.iter().tuple_windows() {
            assert_eq!(a.row.abs_diff(b.row) + a.col.abs_diff(b.col), 1);
        }

        let marked: Vec<Point> = grid
            .cells()
            .filter(|(_, cell)| cell.on_path())
            .map(|(p, _)| p)
            .collect();
        assert_eq!(marked.len(), path.len());
        assert!(marked.iter().all(|p| path.contains(p)));

        assert_eq!(
            grid.to_string(),
            "
S#***
*#*#*
***#E"
                .trim()
        );
    }

    #[test]
    fn unsearched_goal_has_no_path() {
        let mut grid = Grid::new(3, 3, false).unwrap();
        assert!(grid.reconstruct(Point::new(2, 2)).is_empty());
        assert!(grid.reconstruct(Point::new(7, 7)).is_empty());
        assert!(grid.cells().all(|(_, cell)| !cell.on_path()));
    }

    #[test]
    fn new_search_clears_old_path() {
        let mut grid = Grid::new(4, 4, false).unwrap();
        grid.shortest_path(Point::new(0, 0), Point::new(3, 3), Algorithm::Dijkstra)
            .unwrap();
        grid.shortest_path(Point::new(0, 0), Point::new(0, 1), Algorithm::Dijkstra)
            .unwrap();
        let marked = grid.cells().filter(|(_, cell)| cell.on_path()).count();
        assert_eq!(marked, 2);
    }

    #[test]
    fn aborted_search_marks_no_path() {
        let mut grid = Grid::parse_layout("..5\n...").unwrap();
        let goal = Point::new(0, 2);
        let (report, path) = grid
            .shortest_path_with_limit(Point::new(0, 0), goal, Algorithm::Dijkstra, Some(3))
            .unwrap();

        assert_eq!(report.outcome, SearchOutcome::LimitExceeded);
        assert!(grid.parent_of(goal).is_some());
        assert!(path.is_empty());
        assert!(grid.cells().all(|(_, cell)| !cell.on_path()));
    }
}
