//! Fixed timestep simulation tick
//!
//! Applies queued key nudges to the ball, steps the physics world and feeds
//! every new contact through the win rules.

use glam::Vec2;

use super::grid::Direction;
use super::policy::{apply_effects, on_collision};
use super::state::{GameEvent, GamePhase, GameState};
use super::world::Physics;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Key presses since the last tick, oldest first
    pub nudges: Vec<Direction>,
}

/// Velocity after one key press
///
/// Screen coordinates, so `Up` decreases y.
pub fn nudge_velocity(vel: Vec2, dir: Direction, speed: f32) -> Vec2 {
    match dir {
        Direction::Up => Vec2::new(vel.x, vel.y - speed),
        Direction::Right => Vec2::new(vel.x + speed, vel.y),
        Direction::Down => Vec2::new(vel.x, vel.y + speed),
        Direction::Left => Vec2::new(vel.x - speed, vel.y),
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    // Keys keep working after the win
    if !input.nudges.is_empty() {
        if let Some(vel) = state.world.velocity(state.ball) {
            let speed = state.settings.nudge_speed;
            let vel = input
                .nudges
                .iter()
                .fold(vel, |v, &dir| nudge_velocity(v, dir, speed));
            state.world.set_velocity(state.ball, vel);
        }
    }

    let win_gravity = Vec2::new(0.0, state.settings.win_gravity);
    for contact in state.world.step(dt) {
        let outcome = on_collision(contact.roles, state.win, win_gravity);
        state.win = outcome.state;
        if !outcome.should_win {
            continue;
        }

        log::info!("Maze solved after {} ticks", state.time_ticks);
        state.phase = GamePhase::Won;
        if apply_effects(&mut state.world, &outcome.effects) {
            state.events.push(GameEvent::Won {
                ticks: state.time_ticks,
            });
        }
    }
}
