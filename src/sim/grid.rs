//! Rectangular cell grid with passage flags
//!
//! Walls between cells are stored as two independent "open" arrays:
//! - `vertical_open[row][col]` is the wall between (row, col) and (row, col + 1)
//! - `horizontal_open[row][col]` is the wall between (row, col) and (row + 1, col)
//!
//! Everything starts closed and unvisited; the maze generator carves passages.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// A cell address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One of the four grid neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Candidate order before shuffling
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Map a `KeyboardEvent.key` value to a direction (WASD and arrows)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" | "W" | "ArrowUp" => Some(Direction::Up),
            "d" | "D" | "ArrowRight" => Some(Direction::Right),
            "s" | "S" | "ArrowDown" => Some(Direction::Down),
            "a" | "A" | "ArrowLeft" => Some(Direction::Left),
            _ => None,
        }
    }
}

/// Maze grid state (visited flags + open walls)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// rows * cols, row-major
    visited: Vec<bool>,
    /// rows * (cols - 1), row-major
    vertical_open: Vec<bool>,
    /// (rows - 1) * cols, row-major
    horizontal_open: Vec<bool>,
}

/// Unchecked serialized form of a [`Grid`]
#[derive(Deserialize)]
struct GridData {
    rows: usize,
    cols: usize,
    visited: Vec<bool>,
    vertical_open: Vec<bool>,
    horizontal_open: Vec<bool>,
}

impl TryFrom<GridData> for Grid {
    type Error = GridError;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        let grid = Grid::new(data.rows, data.cols)?;
        if data.visited.len() != grid.visited.len()
            || data.vertical_open.len() != grid.vertical_open.len()
            || data.horizontal_open.len() != grid.horizontal_open.len()
        {
            return Err(GridError::Malformed {
                rows: data.rows,
                cols: data.cols,
            });
        }
        Ok(Self {
            visited: data.visited,
            vertical_open: data.vertical_open,
            horizontal_open: data.horizontal_open,
            ..grid
        })
    }
}

impl Grid {
    /// Create a grid with every cell unvisited and every wall closed
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self {
            rows,
            cols,
            visited: vec![false; rows * cols],
            vertical_open: vec![false; rows * (cols - 1)],
            horizontal_open: vec![false; (rows - 1) * cols],
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    fn check(row: usize, col: usize, rows: usize, cols: usize) -> Result<usize, GridError> {
        if row < rows && col < cols {
            Ok(row * cols + col)
        } else {
            Err(GridError::OutOfRange {
                row,
                col,
                rows,
                cols,
            })
        }
    }

    pub fn is_visited(&self, row: usize, col: usize) -> Result<bool, GridError> {
        let i = Self::check(row, col, self.rows, self.cols)?;
        Ok(self.visited[i])
    }

    pub fn set_visited(&mut self, row: usize, col: usize, visited: bool) -> Result<(), GridError> {
        let i = Self::check(row, col, self.rows, self.cols)?;
        self.visited[i] = visited;
        Ok(())
    }

    /// Wall between (row, col) and (row, col + 1); `col` must be < cols - 1
    pub fn is_vertical_open(&self, row: usize, col: usize) -> Result<bool, GridError> {
        let i = Self::check(row, col, self.rows, self.cols - 1)?;
        Ok(self.vertical_open[i])
    }

    pub fn set_vertical_open(&mut self, row: usize, col: usize, open: bool) -> Result<(), GridError> {
        let i = Self::check(row, col, self.rows, self.cols - 1)?;
        self.vertical_open[i] = open;
        Ok(())
    }

    /// Wall between (row, col) and (row + 1, col); `row` must be < rows - 1
    pub fn is_horizontal_open(&self, row: usize, col: usize) -> Result<bool, GridError> {
        let i = Self::check(row, col, self.rows - 1, self.cols)?;
        Ok(self.horizontal_open[i])
    }

    pub fn set_horizontal_open(
        &mut self,
        row: usize,
        col: usize,
        open: bool,
    ) -> Result<(), GridError> {
        let i = Self::check(row, col, self.rows - 1, self.cols)?;
        self.horizontal_open[i] = open;
        Ok(())
    }

    /// The in-bounds neighbor of `cell` in direction `dir`
    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        let (row, col) = match dir {
            Direction::Up => (cell.row.checked_sub(1)?, cell.col),
            Direction::Right => (cell.row, cell.col + 1),
            Direction::Down => (cell.row + 1, cell.col),
            Direction::Left => (cell.row, cell.col.checked_sub(1)?),
        };
        let next = Cell::new(row, col);
        self.contains(next).then_some(next)
    }

    // Unchecked helpers for the generator. Callers guarantee bounds.

    #[inline]
    pub(crate) fn visited_at(&self, cell: Cell) -> bool {
        self.visited[cell.row * self.cols + cell.col]
    }

    #[inline]
    pub(crate) fn mark_visited(&mut self, cell: Cell) {
        self.visited[cell.row * self.cols + cell.col] = true;
    }

    /// Flag index for the wall on side `dir` of `cell`, if that wall is internal
    fn wall_slot(&self, cell: Cell, dir: Direction) -> Option<(bool, usize)> {
        let vcols = self.cols - 1;
        match dir {
            Direction::Left if cell.col > 0 => Some((true, cell.row * vcols + cell.col - 1)),
            Direction::Right if cell.col + 1 < self.cols => {
                Some((true, cell.row * vcols + cell.col))
            }
            Direction::Up if cell.row > 0 => Some((false, (cell.row - 1) * self.cols + cell.col)),
            Direction::Down if cell.row + 1 < self.rows => {
                Some((false, cell.row * self.cols + cell.col))
            }
            _ => None,
        }
    }

    /// Remove the wall on side `dir` of `cell`. No-op on the outer boundary.
    pub fn open_wall(&mut self, cell: Cell, dir: Direction) {
        match self.wall_slot(cell, dir) {
            Some((true, i)) => self.vertical_open[i] = true,
            Some((false, i)) => self.horizontal_open[i] = true,
            None => {}
        }
    }

    /// Whether the ball can leave `cell` through side `dir`
    pub fn is_open(&self, cell: Cell, dir: Direction) -> bool {
        if !self.contains(cell) {
            return false;
        }
        match self.wall_slot(cell, dir) {
            Some((true, i)) => self.vertical_open[i],
            Some((false, i)) => self.horizontal_open[i],
            None => false,
        }
    }

    pub fn all_visited(&self) -> bool {
        self.visited.iter().all(|&v| v)
    }

    /// Number of removed walls across both arrays
    pub fn open_count(&self) -> usize {
        self.vertical_open.iter().filter(|&&o| o).count()
            + self.horizontal_open.iter().filter(|&&o| o).count()
    }

    /// Every open passage as a pair of adjacent cells
    pub fn passages(&self) -> Vec<(Cell, Cell)> {
        let mut out = Vec::with_capacity(self.open_count());
        for row in 0..self.rows {
            for col in 0..self.cols - 1 {
                if self.vertical_open[row * (self.cols - 1) + col] {
                    out.push((Cell::new(row, col), Cell::new(row, col + 1)));
                }
            }
        }
        for row in 0..self.rows - 1 {
            for col in 0..self.cols {
                if self.horizontal_open[row * self.cols + col] {
                    out.push((Cell::new(row, col), Cell::new(row + 1, col)));
                }
            }
        }
        out
    }

    /// Row-major iterator over `(row, col, open)` for the vertical walls
    pub fn vertical_walls(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        let vcols = self.cols - 1;
        self.vertical_open
            .iter()
            .enumerate()
            .map(move |(i, &open)| (i / vcols, i % vcols, open))
    }

    /// Row-major iterator over `(row, col, open)` for the horizontal walls
    pub fn horizontal_walls(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        let cols = self.cols;
        self.horizontal_open
            .iter()
            .enumerate()
            .map(move |(i, &open)| (i / cols, i % cols, open))
    }
}

/// ASCII rendering, one `+---+` box per cell
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "+---".repeat(self.cols);
        writeln!(f, "{rule}+")?;
        for row in 0..self.rows {
            write!(f, "|")?;
            for col in 0..self.cols {
                let open = self.is_open(Cell::new(row, col), Direction::Right);
                write!(f, "   {}", if open { ' ' } else { '|' })?;
            }
            writeln!(f)?;
            write!(f, "+")?;
            for col in 0..self.cols {
                let open = self.is_open(Cell::new(row, col), Direction::Down);
                write!(f, "{}+", if open { "   " } else { "---" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
