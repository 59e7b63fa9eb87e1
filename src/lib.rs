//! Carve random caves on a grid and find shortest paths through them
//!
//! A [Grid] owns its cells in a row-major arena. [MazeGenerator] opens a
//! connected region by randomized depth-first carving (or scatters walls),
//! optionally stamping random weights. [Grid::search] then runs Dijkstra or
//! A* and leaves costs and parent links in the cells, and
//! [Grid::reconstruct] turns those into a start-to-goal path.
//!
//! # Examples
//! ## Hand-drawn grid
//! ```
//! use gridpath::{Algorithm, Grid, Point};
//!
//! let layout = "
//! S.#..
//! ..#..
//! ..#.E
//! ..#..
//! .....";
//! let mut grid = Grid::parse_layout(layout.trim()).unwrap();
//! let (start, goal) = (grid.start().unwrap(), grid.goal().unwrap());
//!
//! let report = grid.search(start, goal, Algorithm::Astar).unwrap();
//! assert_eq!(report.cost(), Some(10));
//!
//! let path = grid.reconstruct(goal);
//! assert!(path.contains(&Point::new(4, 2)));
//! println!("{grid}");
//! ```
//!
//! ## Generated grid
//! ```
//! use gridpath::{Algorithm, Config, MazeGenerator};
//!
//! let config = Config {
//!     rows: 30,
//!     cols: 40,
//!     max_weight: 5,
//!     seed: Some(7),
//!     ..Config::default()
//! };
//! let mut grid = MazeGenerator::new(config.seed).generate(&config).unwrap();
//! let (report, path) = grid
//!     .shortest_path(config.start_point(), config.goal_point(), Algorithm::Dijkstra)
//!     .unwrap();
//! assert_eq!(report.reached(), !path.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod maze_generator;
pub mod path;
pub mod search;

pub use config::{Config, LayoutMode};
pub use error::GridError;
pub use grid::{Cell, Grid, Point, UNREACHABLE};
pub use maze_generator::MazeGenerator;
pub use search::{euclidean, Algorithm, SearchOutcome, SearchReport};
