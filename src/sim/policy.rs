//! Win detection for collision events
//!
//! Pure decision logic: the policy looks at the roles of the two bodies in a
//! collision and the current win state, and describes what should happen.
//! Applying those effects to a world is a separate step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::world::Physics;

/// What a physics body is in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyRole {
    /// Internal maze wall (collapses on win)
    Wall,
    /// Outer edge of the play area (never collapses)
    Boundary,
    Ball,
    Goal,
}

/// Whether the maze has been solved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WinState {
    pub won: bool,
}

/// A world change requested by the policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Replace world gravity
    SetGravity(Vec2),
    /// Make every `BodyRole::Wall` body dynamic
    ReleaseWalls,
    /// Reveal the win indicator
    ShowWinner,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollisionOutcome {
    pub should_win: bool,
    pub state: WinState,
    pub effects: Vec<Effect>,
}

/// Whether a pair of roles is the ball touching the goal (either order)
pub fn is_ball_goal(a: BodyRole, b: BodyRole) -> bool {
    match (a, b) {
        (BodyRole::Ball, BodyRole::Goal) | (BodyRole::Goal, BodyRole::Ball) => true,
        _ => false,
    }
}

/// Decide the outcome of one collision-start pair
///
/// Only the first ball/goal contact wins; once `state.won` is set, later
/// contacts produce no effects.
pub fn on_collision(pair: (BodyRole, BodyRole), state: WinState, win_gravity: Vec2) -> CollisionOutcome {
    let should_win = !state.won && is_ball_goal(pair.0, pair.1);
    if !should_win {
        return CollisionOutcome {
            should_win,
            state,
            effects: Vec::new(),
        };
    }

    CollisionOutcome {
        should_win,
        state: WinState { won: true },
        effects: vec![
            Effect::ShowWinner,
            Effect::SetGravity(win_gravity),
            Effect::ReleaseWalls,
        ],
    }
}

/// Apply world-side effects. Returns true if the win indicator should show.
pub fn apply_effects<P: Physics + ?Sized>(world: &mut P, effects: &[Effect]) -> bool {
    let mut show_winner = false;
    for effect in effects {
        match *effect {
            Effect::SetGravity(g) => world.set_gravity(g),
            Effect::ReleaseWalls => {
                let released = world.release_role(BodyRole::Wall);
                log::info!("Released {} walls", released);
            }
            Effect::ShowWinner => show_winner = true,
        }
    }
    show_winner
}
