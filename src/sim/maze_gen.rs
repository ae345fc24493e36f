//! Maze generation using the randomized recursive backtracker
//!
//! Depth-first traversal from a start cell. On entering a cell the four
//! candidate directions are shuffled; each in-bounds unvisited neighbor gets
//! its shared wall opened and is explored fully before the next candidate.
//! The opened walls form a spanning tree of the grid.
//!
//! The traversal runs on an explicit stack of frames (cell, shuffled
//! directions, next index), so depth is bounded by the heap rather than the
//! call stack. Visit order and RNG consumption are identical to the
//! recursive formulation.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::{Cell, Direction, Grid};
use crate::error::GridError;

/// Source of neighbor visit order
pub trait NeighborOrder {
    /// Reorder the four candidate directions in place
    fn order(&mut self, dirs: &mut [Direction; 4]);
}

/// Uniform random permutation (Fisher-Yates) from an injected RNG
pub struct RandomOrder<'a, R: Rng + ?Sized>(pub &'a mut R);

impl<R: Rng + ?Sized> NeighborOrder for RandomOrder<'_, R> {
    fn order(&mut self, dirs: &mut [Direction; 4]) {
        for i in (1..dirs.len()).rev() {
            let j = self.0.random_range(0..=i);
            dirs.swap(i, j);
        }
    }
}

/// Leaves the candidates in `Direction::ALL` order (up, right, down, left)
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOrder;

impl NeighborOrder for FixedOrder {
    fn order(&mut self, _dirs: &mut [Direction; 4]) {}
}

/// One suspended cell visit
struct Frame {
    cell: Cell,
    dirs: [Direction; 4],
    next: usize,
}

/// Carve the maze starting at `start` with a random neighbor order
pub fn generate<R: Rng + ?Sized>(grid: &mut Grid, start: Cell, rng: &mut R) -> Result<(), GridError> {
    generate_with(grid, start, &mut RandomOrder(rng))
}

/// Carve the maze starting at `start`, taking neighbor order from `order`
///
/// Returns immediately if `start` is already visited.
pub fn generate_with<O: NeighborOrder + ?Sized>(
    grid: &mut Grid,
    start: Cell,
    order: &mut O,
) -> Result<(), GridError> {
    if grid.is_visited(start.row, start.col)? {
        return Ok(());
    }

    let mut stack = Vec::with_capacity(grid.cell_count());
    stack.push(enter(grid, start, order));

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.dirs.len() {
            stack.pop();
            continue;
        }
        let dir = frame.dirs[frame.next];
        frame.next += 1;
        let cell = frame.cell;

        let Some(next) = grid.neighbor(cell, dir) else {
            continue;
        };
        if grid.visited_at(next) {
            continue;
        }

        grid.open_wall(cell, dir);
        stack.push(enter(grid, next, order));
    }

    Ok(())
}

fn enter<O: NeighborOrder + ?Sized>(grid: &mut Grid, cell: Cell, order: &mut O) -> Frame {
    grid.mark_visited(cell);
    let mut dirs = Direction::ALL;
    order.order(&mut dirs);
    Frame { cell, dirs, next: 0 }
}

/// Uniformly random start cell
pub fn random_start<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Cell {
    Cell::new(rng.random_range(0..rows), rng.random_range(0..cols))
}

/// Build and carve a `rows` x `cols` maze from a seed
pub fn generate_maze(rows: usize, cols: usize, seed: u64) -> Result<Grid, GridError> {
    let mut grid = Grid::new(rows, cols)?;
    let mut rng = Pcg32::seed_from_u64(seed);
    let start = random_start(rows, cols, &mut rng);
    generate(&mut grid, start, &mut rng)?;
    log::debug!(
        "Generated {}x{} maze (seed {}, start {:?}, {} passages)",
        rows,
        cols,
        seed,
        start,
        grid.open_count()
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a scripted list of permutations
    struct Scripted(Vec<[Direction; 4]>);

    impl NeighborOrder for Scripted {
        fn order(&mut self, dirs: &mut [Direction; 4]) {
            if !self.0.is_empty() {
                *dirs = self.0.remove(0);
            }
        }
    }

    #[test]
    fn test_all_cells_visited() {
        let grid = generate_maze(12, 9, 4242).unwrap();
        assert!(grid.all_visited());
        assert_eq!(grid.open_count(), 12 * 9 - 1);
    }

    #[test]
    fn test_single_cell() {
        let grid = generate_maze(1, 1, 7).unwrap();
        assert!(grid.all_visited());
        assert_eq!(grid.open_count(), 0);
    }

    #[test]
    fn test_determinism() {
        let a = generate_maze(10, 10, 99999).unwrap();
        let b = generate_maze(10, 10, 99999).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds() {
        let a = generate_maze(10, 10, 11111).unwrap();
        let b = generate_maze(10, 10, 22222).unwrap();
        // Different seeds should (almost certainly) produce different mazes
        assert_ne!(a, b);
    }

    #[test]
    fn test_fixed_order_2x2() {
        // Start top-left. Up is out of bounds, right opens (0,0)-(0,1).
        // From (0,1): up/right out, down opens (0,1)-(1,1).
        // From (1,1): up visited, right/down out, left opens (1,1)-(1,0).
        let mut grid = Grid::new(2, 2).unwrap();
        generate_with(&mut grid, Cell::new(0, 0), &mut FixedOrder).unwrap();

        assert_eq!(grid.is_vertical_open(0, 0), Ok(true));
        assert_eq!(grid.is_vertical_open(1, 0), Ok(true));
        assert_eq!(grid.is_horizontal_open(0, 0), Ok(false));
        assert_eq!(grid.is_horizontal_open(0, 1), Ok(true));
        assert_eq!(grid.open_count(), 3);
    }

    #[test]
    fn test_fixed_order_is_a_serpentine_from_top_left() {
        // Always preferring "right" then "down" then "left" walks row 0
        // rightwards, drops down, then sweeps row 1 leftwards.
        let mut grid = Grid::new(2, 4).unwrap();
        generate_with(&mut grid, Cell::new(0, 0), &mut FixedOrder).unwrap();
        for col in 0..3 {
            assert_eq!(grid.is_vertical_open(0, col), Ok(true));
            assert_eq!(grid.is_vertical_open(1, col), Ok(true));
        }
        assert_eq!(grid.is_horizontal_open(0, 3), Ok(true));
        assert_eq!(grid.open_count(), 7);
    }

    #[test]
    fn test_backtracks_in_visit_order() {
        // (0,0) prefers down then right; (1,0) prefers right; (1,1) up.
        let mut grid = Grid::new(2, 2).unwrap();
        let mut order = Scripted(vec![
            [Direction::Down, Direction::Right, Direction::Up, Direction::Left],
            [Direction::Right, Direction::Up, Direction::Down, Direction::Left],
            [Direction::Up, Direction::Right, Direction::Down, Direction::Left],
        ]);
        generate_with(&mut grid, Cell::new(0, 0), &mut order).unwrap();

        assert_eq!(grid.is_horizontal_open(0, 0), Ok(true)); // (0,0)-(1,0)
        assert_eq!(grid.is_vertical_open(1, 0), Ok(true)); // (1,0)-(1,1)
        assert_eq!(grid.is_horizontal_open(0, 1), Ok(true)); // (1,1)-(0,1)
        // (0,0)'s second choice found (0,1) already visited
        assert_eq!(grid.is_vertical_open(0, 0), Ok(false));
    }

    #[test]
    fn test_visited_start_is_noop() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_visited(1, 1, true).unwrap();
        generate_with(&mut grid, Cell::new(1, 1), &mut FixedOrder).unwrap();
        assert_eq!(grid.open_count(), 0);
    }

    #[test]
    fn test_start_out_of_range() {
        let mut grid = Grid::new(3, 3).unwrap();
        let result = generate_with(&mut grid, Cell::new(3, 0), &mut FixedOrder);
        assert!(matches!(result, Err(GridError::OutOfRange { .. })));
    }

    #[test]
    fn test_large_grid_does_not_overflow_stack() {
        // A serpentine over a long thin grid is one path of rows * cols cells
        let mut grid = Grid::new(2, 100_000).unwrap();
        generate_with(&mut grid, Cell::new(0, 0), &mut FixedOrder).unwrap();
        assert!(grid.all_visited());
        assert_eq!(grid.open_count(), 2 * 100_000 - 1);
    }

    #[test]
    fn test_random_order_is_permutation() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut order = RandomOrder(&mut rng);
        for _ in 0..100 {
            let mut dirs = Direction::ALL;
            order.order(&mut dirs);
            for dir in Direction::ALL {
                assert!(dirs.contains(&dir));
            }
        }
    }

    #[test]
    fn test_random_start_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            let cell = random_start(3, 5, &mut rng);
            assert!(cell.row < 3 && cell.col < 5);
        }
    }
}
