//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by body handle)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod grid;
pub mod maze_gen;
pub mod policy;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{CollisionResult, circle_rect_collision, rect_rect_collision};
pub use geometry::{Circle, MazeGeometry, Rect, ball_placement, boundary_walls, goal_placement, map_to_walls};
pub use grid::{Cell, Direction, Grid};
pub use maze_gen::{FixedOrder, NeighborOrder, RandomOrder, generate, generate_maze, generate_with, random_start};
pub use policy::{BodyRole, CollisionOutcome, Effect, WinState, apply_effects, is_ball_goal, on_collision};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, nudge_velocity, tick};
pub use world::{Body, BodyHandle, ContactPair, Physics, Shape, World};
