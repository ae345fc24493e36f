//! Grid to world geometry
//!
//! Screen coordinates: origin top-left, y grows downward, one cell is
//! `cell_width` x `cell_height` units. Every remaining internal wall becomes
//! a thin rectangle centered on the shared edge of its two cells.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::consts::{BALL_RADIUS_FACTOR, GOAL_SCALE};
use crate::settings::Settings;

/// Axis-aligned rectangle given by center and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self {
            center: Vec2::new(cx, cy),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Rectangles for every closed internal wall
///
/// Horizontal walls (between row r and r + 1) come first, then vertical
/// walls (between column c and c + 1), each in row-major order.
pub fn map_to_walls(grid: &Grid, cell_width: f32, cell_height: f32, wall_thickness: f32) -> Vec<Rect> {
    let closed = grid.cell_count() * 2 - grid.rows() - grid.cols() - grid.open_count();
    let mut walls = Vec::with_capacity(closed);

    for (row, col, open) in grid.horizontal_walls() {
        if open {
            continue;
        }
        walls.push(Rect::new(
            col as f32 * cell_width + cell_width / 2.0,
            (row + 1) as f32 * cell_height,
            cell_width,
            wall_thickness,
        ));
    }

    for (row, col, open) in grid.vertical_walls() {
        if open {
            continue;
        }
        walls.push(Rect::new(
            (col + 1) as f32 * cell_width,
            row as f32 * cell_height + cell_height / 2.0,
            wall_thickness,
            cell_height,
        ));
    }

    walls
}

/// The four outer edges of the play area: top, bottom, left, right
pub fn boundary_walls(width: f32, height: f32, thickness: f32) -> [Rect; 4] {
    [
        Rect::new(width / 2.0, 0.0, width, thickness),
        Rect::new(width / 2.0, height, width, thickness),
        Rect::new(0.0, height / 2.0, thickness, height),
        Rect::new(width, height / 2.0, thickness, height),
    ]
}

/// Goal square in the bottom-right cell
pub fn goal_placement(width: f32, height: f32, cell_width: f32, cell_height: f32) -> Rect {
    Rect::new(
        width - cell_width / 2.0,
        height - cell_height / 2.0,
        cell_width * GOAL_SCALE,
        cell_height * GOAL_SCALE,
    )
}

/// Ball spawn in the top-left cell
pub fn ball_placement(cell_width: f32, cell_height: f32) -> Circle {
    Circle {
        center: Vec2::new(cell_width / 2.0, cell_height / 2.0),
        radius: cell_width.min(cell_height) * BALL_RADIUS_FACTOR,
    }
}

/// Everything needed to populate a physics world for one maze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeGeometry {
    /// Play area size
    pub size: Vec2,
    pub cell_size: Vec2,
    pub walls: Vec<Rect>,
    pub boundaries: [Rect; 4],
    pub goal: Rect,
    pub ball: Circle,
}

impl MazeGeometry {
    /// Lay out `grid` over a `width` x `height` play area
    pub fn build(grid: &Grid, width: f32, height: f32, wall_thickness: f32, boundary_thickness: f32) -> Self {
        let cell_w = width / grid.cols() as f32;
        let cell_h = height / grid.rows() as f32;
        Self::with_cells(grid, width, height, (cell_w, cell_h), wall_thickness, boundary_thickness)
    }

    /// Lay out a grid whose dimensions match `settings`
    pub fn from_settings(grid: &Grid, settings: &Settings) -> Self {
        debug_assert_eq!((grid.rows(), grid.cols()), (settings.rows, settings.cols));
        Self::with_cells(
            grid,
            settings.width,
            settings.height,
            settings.cell_size(),
            settings.wall_thickness,
            settings.boundary_thickness,
        )
    }

    fn with_cells(
        grid: &Grid,
        width: f32,
        height: f32,
        (cell_w, cell_h): (f32, f32),
        wall_thickness: f32,
        boundary_thickness: f32,
    ) -> Self {
        let geometry = Self {
            size: Vec2::new(width, height),
            cell_size: Vec2::new(cell_w, cell_h),
            walls: map_to_walls(grid, cell_w, cell_h, wall_thickness),
            boundaries: boundary_walls(width, height, boundary_thickness),
            goal: goal_placement(width, height, cell_w, cell_h),
            ball: ball_placement(cell_w, cell_h),
        };
        log::debug!(
            "Maze geometry: {} walls, cell {:.1}x{:.1}",
            geometry.walls.len(),
            cell_w,
            cell_h
        );
        geometry
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::{Cell, Direction};
    use crate::sim::maze_gen::{FixedOrder, generate_maze, generate_with};

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_closed_grid_wall_count() {
        let grid = Grid::new(4, 5).unwrap();
        let walls = map_to_walls(&grid, 10.0, 10.0, 4.0);
        assert_eq!(walls.len(), 3 * 5 + 4 * 4);
    }

    #[test]
    fn test_generated_maze_wall_count() {
        let grid = generate_maze(6, 6, 31337).unwrap();
        let walls = map_to_walls(&grid, 10.0, 10.0, 4.0);
        // Closed grid minus one wall per spanning-tree edge
        assert_eq!(walls.len(), 5 * 6 + 6 * 5 - (6 * 6 - 1));
    }

    #[test]
    fn test_single_cell_has_no_internal_walls() {
        let grid = generate_maze(1, 1, 3).unwrap();
        let geometry = MazeGeometry::build(&grid, 300.0, 200.0, 4.0, 2.0);
        assert!(geometry.walls.is_empty());
        assert_eq!(geometry.boundaries.len(), 4);
        assert!(approx(geometry.goal.center, Vec2::new(150.0, 100.0)));
        assert!(approx(geometry.ball.center, geometry.goal.center));
    }

    #[test]
    fn test_wall_positions() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.open_wall(Cell::new(0, 0), Direction::Right);
        grid.open_wall(Cell::new(0, 0), Direction::Down);
        grid.open_wall(Cell::new(1, 0), Direction::Right);

        let walls = map_to_walls(&grid, 100.0, 50.0, 4.0);
        assert_eq!(
            walls,
            vec![
                // Between (0,1) and (1,1)
                Rect::new(150.0, 50.0, 100.0, 4.0),
            ]
        );

        let mut grid = Grid::new(2, 2).unwrap();
        grid.open_wall(Cell::new(0, 0), Direction::Down);
        grid.open_wall(Cell::new(0, 1), Direction::Down);
        grid.open_wall(Cell::new(1, 0), Direction::Right);
        let walls = map_to_walls(&grid, 100.0, 50.0, 4.0);
        assert_eq!(
            walls,
            vec![
                // Between (0,0) and (0,1)
                Rect::new(100.0, 25.0, 4.0, 50.0),
            ]
        );
    }

    #[test]
    fn test_fixed_order_2x2_layout() {
        // Passages: (0,0)-(0,1), (0,1)-(1,1), (1,1)-(1,0). Only the
        // horizontal wall under (0,0) remains.
        let mut grid = Grid::new(2, 2).unwrap();
        generate_with(&mut grid, Cell::new(0, 0), &mut FixedOrder).unwrap();
        let walls = map_to_walls(&grid, 60.0, 40.0, 4.0);
        assert_eq!(walls, vec![Rect::new(30.0, 40.0, 60.0, 4.0)]);
    }

    #[test]
    fn test_boundaries() {
        let [top, bottom, left, right] = boundary_walls(800.0, 600.0, 2.0);
        assert_eq!(top, Rect::new(400.0, 0.0, 800.0, 2.0));
        assert_eq!(bottom, Rect::new(400.0, 600.0, 800.0, 2.0));
        assert_eq!(left, Rect::new(0.0, 300.0, 2.0, 600.0));
        assert_eq!(right, Rect::new(800.0, 300.0, 2.0, 600.0));
    }

    #[test]
    fn test_goal_and_ball() {
        let goal = goal_placement(600.0, 600.0, 100.0, 100.0);
        assert!(approx(goal.center, Vec2::new(550.0, 550.0)));
        assert!(approx(goal.size, Vec2::new(60.0, 60.0)));

        let ball = ball_placement(100.0, 80.0);
        assert!(approx(ball.center, Vec2::new(50.0, 40.0)));
        assert!((ball.radius - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_rect_extents() {
        let r = Rect::new(10.0, 20.0, 4.0, 8.0);
        assert_eq!(r.min(), Vec2::new(8.0, 16.0));
        assert_eq!(r.max(), Vec2::new(12.0, 24.0));
    }

    #[test]
    fn test_from_settings_uses_settings_cell_size() {
        let settings = Settings {
            rows: 3,
            cols: 4,
            ..Default::default()
        }
        .with_viewport(800.0, 600.0);
        let grid = generate_maze(3, 4, 11).unwrap();
        let geometry = MazeGeometry::from_settings(&grid, &settings);
        assert_eq!(geometry.cell_size, Vec2::new(200.0, 200.0));
        assert_eq!(geometry, MazeGeometry::build(&grid, 800.0, 600.0, 4.0, 2.0));
    }

    #[test]
    fn test_json_dump() {
        let grid = generate_maze(2, 3, 1).unwrap();
        let geometry = MazeGeometry::build(&grid, 90.0, 60.0, 4.0, 2.0);
        let json = geometry.to_json().unwrap();
        let back: MazeGeometry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, geometry);
    }
}
