//! Cells and the grid that owns them

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::error::GridError;

/// Sentinel for a cell whose cost has not been reached by a search
pub const UNREACHABLE: u64 = u64::MAX;

/// Cardinal offsets in N, E, S, W order
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Number of cells in a `rows` x `cols` grid, if both are positive and the
/// product fits in `usize`
pub(crate) fn cell_count(rows: usize, cols: usize) -> Result<usize, GridError> {
    if rows == 0 || cols == 0 {
        return Err(GridError::Configuration(format!(
            "grid dimensions must be positive, got {rows}x{cols}"
        )));
    }
    rows.checked_mul(cols).ok_or_else(|| {
        GridError::Configuration(format!("grid of {rows}x{cols} cells is too large"))
    })
}

/// Location in the grid
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Parse `"row,col"`, as given on the command line.
impl FromStr for Point {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GridError::Configuration(format!("expected `row,col`, got `{s}`"));
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        Ok(Point {
            row: row.trim().parse().map_err(|_| invalid())?,
            col: col.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// One grid position.
///
/// Wall, endpoint and weight flags are set during generation and survive
/// between searches. The remaining fields are search scratch, reset by
/// every search run.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub(crate) is_wall: bool,
    pub(crate) is_start: bool,
    pub(crate) is_goal: bool,
    pub(crate) weight: u32,
    pub(crate) on_path: bool,
    pub(crate) best_cost: u64,
    pub(crate) estimated_total_cost: f64,
    /// Index of the predecessor on the best known path
    pub(crate) parent: Option<usize>,
    /// Popped from the frontier with a final cost
    pub(crate) closed: bool,
}

impl Cell {
    fn new(is_wall: bool) -> Self {
        Self {
            is_wall,
            is_start: false,
            is_goal: false,
            weight: 1,
            on_path: false,
            best_cost: UNREACHABLE,
            estimated_total_cost: f64::INFINITY,
            parent: None,
            closed: false,
        }
    }

    fn reset_scratch(&mut self) {
        self.on_path = false;
        self.best_cost = UNREACHABLE;
        self.estimated_total_cost = f64::INFINITY;
        self.parent = None;
        self.closed = false;
    }

    pub fn is_wall(&self) -> bool {
        self.is_wall
    }

    pub fn is_start(&self) -> bool {
        self.is_start
    }

    pub fn is_goal(&self) -> bool {
        self.is_goal
    }

    /// Cost of stepping onto this cell
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Whether the last reconstructed path runs through this cell
    pub fn on_path(&self) -> bool {
        self.on_path
    }

    /// Shortest known distance from the last search's start, if reached
    pub fn best_cost(&self) -> Option<u64> {
        (self.best_cost != UNREACHABLE).then_some(self.best_cost)
    }

    /// A* estimate `g + h` from the last search
    pub fn estimated_total_cost(&self) -> f64 {
        self.estimated_total_cost
    }
}

/// Rectangular grid of cells, stored row-major.
///
/// Neighbor relations are computed from coordinates on demand; cells hold
/// no links to each other, only parent indices into this grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    pub(crate) cells: Vec<Cell>,
}

impl Grid {
    const S_WALL: char = '#';
    const S_OPEN: char = '.';
    const S_START: char = 'S';
    const S_GOAL: char = 'E';
    const S_PATH: char = '*';

    const E_WALL: char = '🟫';
    const E_OPEN: char = '🟩';
    const E_START: char = '🏃';
    const E_GOAL: char = '❎';
    const E_PATH: char = '🟨';

    /// Create a `rows` x `cols` grid with every cell walled (or open).
    pub fn new(rows: usize, cols: usize, walls: bool) -> Result<Self, GridError> {
        let len = cell_count(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::new(walls); len],
        })
    }

    /// Parse a text layout.
    ///
    /// Each line is one row. Accepted symbols: `#` or 🟫 for walls, `.` or
    /// 🟩 for open cells, `S` or 🏃 for the start, `E` or ❎ for the goal,
    /// `*` or 🟨 for an open path cell, and digits `1`-`9` for open cells
    /// of that weight. Blank lines are skipped.
    ///
    /// # Examples
    /// ```
    /// use gridpath::{Grid, Point};
    ///
    /// let grid = Grid::parse_layout("S.#\n.9E").unwrap();
    /// assert_eq!(grid.start(), Some(Point::new(0, 0)));
    /// assert_eq!(grid.goal(), Some(Point::new(1, 2)));
    /// assert_eq!(grid.cell(Point::new(1, 1)).unwrap().weight(), 9);
    /// ```
    pub fn parse_layout(layout: &str) -> Result<Self, GridError> {
        let lines: Vec<(usize, Vec<char>)> = layout
            .lines()
            .enumerate()
            .map(|(n, line)| (n + 1, line.trim_end().chars().collect::<Vec<_>>()))
            .filter(|(_, row)| !row.is_empty())
            .collect();

        let (_, first) = lines
            .first()
            .ok_or_else(|| GridError::Configuration("layout is empty".to_string()))?;
        let mut grid = Grid::new(lines.len(), first.len(), false)?;

        for (row, (line, symbols)) in lines.iter().enumerate() {
            if symbols.len() != grid.cols {
                return Err(GridError::RaggedLayout {
                    line: *line,
                    expected: grid.cols,
                    found: symbols.len(),
                });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                let point = Point::new(row, col);
                match symbol {
                    Self::S_WALL | Self::E_WALL => grid.set_wall(point, true),
                    Self::S_OPEN | Self::E_OPEN | Self::S_PATH | Self::E_PATH => (),
                    Self::S_START | Self::E_START => grid.set_start(point)?,
                    Self::S_GOAL | Self::E_GOAL => grid.set_goal(point)?,
                    '1'..='9' => grid.set_weight(point, symbol as u32 - '0' as u32)?,
                    found => {
                        return Err(GridError::Layout {
                            line: *line,
                            column: col + 1,
                            found,
                        })
                    }
                }
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `0 <= row < rows` and `0 <= col < cols`
    pub fn contains(&self, point: Point) -> bool {
        point.row < self.rows && point.col < self.cols
    }

    pub(crate) fn index(&self, point: Point) -> Option<usize> {
        self.contains(point).then(|| point.row * self.cols + point.col)
    }

    pub(crate) fn point(&self, index: usize) -> Point {
        Point::new(index / self.cols, index % self.cols)
    }

    pub fn cell(&self, point: Point) -> Option<&Cell> {
        self.index(point).map(|i| &self.cells[i])
    }

    /// All cells with their locations, row by row
    pub fn cells(&self) -> impl Iterator<Item = (Point, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (self.point(i), cell))
    }

    /// In-bounds cardinal neighbors of `point`, walls included.
    ///
    /// Yields nothing for an out-of-bounds `point`.
    pub fn neighbors(&self, point: Point) -> impl Iterator<Item = Point> {
        let (rows, cols) = (self.rows, self.cols);
        let inside = self.contains(point);
        DIRECTIONS.into_iter().filter_map(move |(dr, dc)| {
            let row = point.row.checked_add_signed(dr)?;
            let col = point.col.checked_add_signed(dc)?;
            (inside && row < rows && col < cols).then_some(Point::new(row, col))
        })
    }

    /// Cardinal neighbors of `point` that are not walls
    pub fn open_neighbors(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        self.neighbors(point)
            .filter(|&p| self.cell(p).is_some_and(|cell| !cell.is_wall))
    }

    /// Neighbor indices of the cell at `index`, without borrowing the grid
    pub(crate) fn neighbor_indices(&self, index: usize) -> impl Iterator<Item = usize> {
        let cols = self.cols;
        self.neighbors(self.point(index))
            .map(move |p| p.row * cols + p.col)
    }

    /// Set or clear the wall flag; out-of-bounds points are ignored
    pub fn set_wall(&mut self, point: Point, is_wall: bool) {
        if let Some(i) = self.index(point) {
            self.cells[i].is_wall = is_wall;
        }
    }

    pub fn set_weight(&mut self, point: Point, weight: u32) -> Result<(), GridError> {
        if weight == 0 {
            return Err(GridError::Configuration(
                "cell weight must be at least 1".to_string(),
            ));
        }
        let i = self.endpoint_index(point)?;
        self.cells[i].weight = weight;
        Ok(())
    }

    /// Mark `point` as the only start cell and clear its wall.
    pub fn set_start(&mut self, point: Point) -> Result<(), GridError> {
        let i = self.endpoint_index(point)?;
        self.cells.iter_mut().for_each(|cell| cell.is_start = false);
        self.cells[i].is_start = true;
        self.cells[i].is_wall = false;
        Ok(())
    }

    /// Mark `point` as the only goal cell and clear its wall.
    pub fn set_goal(&mut self, point: Point) -> Result<(), GridError> {
        let i = self.endpoint_index(point)?;
        self.cells.iter_mut().for_each(|cell| cell.is_goal = false);
        self.cells[i].is_goal = true;
        self.cells[i].is_wall = false;
        Ok(())
    }

    pub fn start(&self) -> Option<Point> {
        self.cells().find(|(_, cell)| cell.is_start).map(|(p, _)| p)
    }

    pub fn goal(&self) -> Option<Point> {
        self.cells().find(|(_, cell)| cell.is_goal).map(|(p, _)| p)
    }

    /// Predecessor of `point` on the last search's best known path
    pub fn parent_of(&self, point: Point) -> Option<Point> {
        let parent = self.cell(point)?.parent?;
        Some(self.point(parent))
    }

    /// Number of cells that are not walls
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_wall).count()
    }

    /// Reset every cell's search scratch: cost, estimate, parent, path mark.
    pub fn reset_scratch(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset_scratch);
    }

    pub(crate) fn endpoint_index(&self, point: Point) -> Result<usize, GridError> {
        self.index(point).ok_or(GridError::InvalidEndpoint {
            point,
            reason: "out of bounds",
        })
    }

    /// Emoji rendering, one row per line
    pub fn to_emojis(&self) -> String {
        self.render(|cell| {
            if cell.is_start {
                Self::E_START
            } else if cell.is_goal {
                Self::E_GOAL
            } else if cell.is_wall {
                Self::E_WALL
            } else if cell.on_path {
                Self::E_PATH
            } else {
                Self::E_OPEN
            }
        })
    }

    fn render(&self, symbol: impl Fn(&Cell) -> char) -> String {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(&symbol).join(""))
            .join("\n")
    }
}

/// ASCII rendering that [Grid::parse_layout] reads back. Weights above 9
/// are shown as `9`.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.render(|cell| {
            if cell.is_start {
                Self::S_START
            } else if cell.is_goal {
                Self::S_GOAL
            } else if cell.is_wall {
                Self::S_WALL
            } else if cell.on_path {
                Self::S_PATH
            } else if cell.weight > 1 {
                char::from_digit(cell.weight.min(9), 10).unwrap_or(Self::S_OPEN)
            } else {
                Self::S_OPEN
            }
        });
        f.write_str(&text)
    }
}
