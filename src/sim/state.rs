//! Game state
//!
//! One maze run: the carved grid, its geometry, the physics world populated
//! from that geometry, and the win flag threaded through collision handling.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::MazeGeometry;
use super::grid::Grid;
use super::maze_gen::generate_maze;
use super::policy::{BodyRole, WinState};
use super::world::{BodyHandle, Physics, World};
use crate::error::ConfigError;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Steering the ball toward the goal
    Playing,
    /// Goal reached, walls collapsing
    Won,
}

/// Notifications for the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball reached the goal on this tick
    Won { ticks: u64 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Maze seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub grid: Grid,
    pub geometry: MazeGeometry,
    pub world: World,
    /// The player's ball
    pub ball: BodyHandle,
    pub win: WinState,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events not yet consumed by the UI
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Generate a maze from `seed` and build its world
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;

        let grid = generate_maze(settings.rows, settings.cols, seed)?;
        let geometry = MazeGeometry::from_settings(&grid, settings);
        let (world, ball) = populate_world(&geometry);

        log::info!(
            "New {}x{} maze (seed {}): {} walls",
            settings.rows,
            settings.cols,
            seed,
            geometry.walls.len()
        );

        Ok(Self {
            seed,
            settings: settings.clone(),
            grid,
            geometry,
            world,
            ball,
            win: WinState::default(),
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
        })
    }

    pub fn ball_position(&self) -> Vec2 {
        self.world.position(self.ball).unwrap_or(self.geometry.ball.center)
    }

    pub fn has_won(&self) -> bool {
        self.win.won
    }

    /// Drain pending UI events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Boundaries, walls, goal, then ball, in that order
fn populate_world(geometry: &MazeGeometry) -> (World, BodyHandle) {
    let mut world = World::new(Vec2::ZERO);
    for edge in geometry.boundaries {
        world.add_static_rect(edge, BodyRole::Boundary);
    }
    for &wall in &geometry.walls {
        world.add_static_rect(wall, BodyRole::Wall);
    }
    world.add_static_rect(geometry.goal, BodyRole::Goal);
    let ball = world.add_dynamic_circle(geometry.ball, BodyRole::Ball);
    (world, ball)
}
