//! Maze Ball - roll a ball through a procedurally generated maze
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze generation, geometry, physics, win rules)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Game configuration and persistence

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, GridError, RenderError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one physics frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default maze size in cells
    pub const DEFAULT_ROWS: usize = 6;
    pub const DEFAULT_COLS: usize = 6;

    /// Thickness of internal maze walls
    pub const WALL_THICKNESS: f32 = 4.0;
    /// Thickness of the play area edges
    pub const BOUNDARY_THICKNESS: f32 = 2.0;

    /// Goal size relative to its cell
    pub const GOAL_SCALE: f32 = 0.6;
    /// Ball radius relative to the smaller cell side
    pub const BALL_RADIUS_FACTOR: f32 = 0.25;

    /// Velocity change per key press
    pub const NUDGE_SPEED: f32 = 5.0;
    /// Downward gravity switched on when the maze is solved
    pub const WIN_GRAVITY: f32 = 1.0;

    /// Velocities are distance per frame at this rate
    pub const FRAME_RATE: f32 = 60.0;
    /// Velocity gained per frame under unit gravity
    pub const GRAVITY_SCALE: f32 = 0.28;
    /// Fraction of velocity lost per frame
    pub const AIR_FRICTION: f32 = 0.01;
    /// Bounciness of ball/wall contacts (0 = no bounce)
    pub const RESTITUTION: f32 = 0.0;
    /// Contacts within this distance still count as touching
    pub const CONTACT_SLOP: f32 = 0.5;
    /// Largest distance any body may move in one physics substep
    pub const MAX_SUBSTEP_TRAVEL: f32 = 1.0;
    pub const MAX_PHYSICS_SUBSTEPS: u32 = 32;
}
