//! Minimal 2-D rigid-body world
//!
//! Enough physics to roll a ball through a maze and let walls fall once the
//! maze is solved: rectangles and circles, static or dynamic, uniform gravity,
//! push-out contact resolution and collision-start events.
//!
//! Velocities are in distance per frame at `FRAME_RATE`, so a nudge of 5
//! moves the ball 5 units each frame. Gravity of 1 adds `GRAVITY_SCALE` to the
//! velocity each frame.
//!
//! Dynamic rectangles only collide with static bodies and the ball; falling
//! walls pass through each other. Fast bodies are substepped so they cannot
//! skip over a thin wall.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{circle_rect_collision, rect_rect_collision, reflect_velocity};
use super::geometry::{Circle, Rect};
use super::policy::BodyRole;
use crate::consts::{
    AIR_FRICTION, CONTACT_SLOP, FRAME_RATE, GRAVITY_SCALE, MAX_PHYSICS_SUBSTEPS, MAX_SUBSTEP_TRAVEL,
    RESTITUTION,
};

/// Stable identifier for a body in a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect { half_extents: Vec2 },
    Circle { radius: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub handle: BodyHandle,
    pub role: BodyRole,
    pub shape: Shape,
    pub pos: Vec2,
    pub vel: Vec2,
    pub is_static: bool,
}

impl Body {
    /// Bounding rectangle for rectangle bodies
    pub fn rect(&self) -> Option<Rect> {
        match self.shape {
            Shape::Rect { half_extents } => Some(Rect {
                center: self.pos,
                size: half_extents * 2.0,
            }),
            Shape::Circle { .. } => None,
        }
    }
}

/// Two bodies that started touching during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactPair {
    pub a: BodyHandle,
    pub b: BodyHandle,
    pub roles: (BodyRole, BodyRole),
}

/// Operations the game needs from a physics engine
pub trait Physics {
    fn gravity(&self) -> Vec2;
    fn set_gravity(&mut self, gravity: Vec2);
    fn add_static_rect(&mut self, rect: Rect, role: BodyRole) -> BodyHandle;
    fn add_dynamic_circle(&mut self, circle: Circle, role: BodyRole) -> BodyHandle;
    /// Current velocity, or `None` for an unknown handle
    fn velocity(&self, body: BodyHandle) -> Option<Vec2>;
    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec2);
    fn set_static(&mut self, body: BodyHandle, is_static: bool);
    /// Make every static body with `role` dynamic; returns how many changed
    fn release_role(&mut self, role: BodyRole) -> usize;
    /// Advance by `dt` seconds and report new contacts
    fn step(&mut self, dt: f32) -> Vec<ContactPair>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    gravity: Vec2,
    bodies: Vec<Body>,
    /// Pairs touching at the end of the last step, as (min, max) handles
    #[serde(skip)]
    contacts: BTreeSet<(BodyHandle, BodyHandle)>,
}

impl World {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
            contacts: BTreeSet::new(),
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.0 as usize)
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle.0 as usize)
    }

    pub fn is_static(&self, handle: BodyHandle) -> bool {
        self.body(handle).is_some_and(|b| b.is_static)
    }

    pub fn position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.body(handle).map(|b| b.pos)
    }

    /// Teleport a body without touching its velocity
    pub fn set_position(&mut self, handle: BodyHandle, pos: Vec2) {
        if let Some(b) = self.body_mut(handle) {
            b.pos = pos;
        }
    }

    fn insert(&mut self, role: BodyRole, shape: Shape, pos: Vec2, is_static: bool) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(Body {
            handle,
            role,
            shape,
            pos,
            vel: Vec2::ZERO,
            is_static,
        });
        handle
    }

    fn integrate(&mut self, frames: f32) {
        let accel = self.gravity * GRAVITY_SCALE * frames;
        let damping = (1.0 - AIR_FRICTION).powf(frames);
        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.vel = (body.vel + accel) * damping;
            body.pos += body.vel * frames;
        }
    }

    /// Resolve contacts and return every touching pair
    fn resolve(&mut self) -> BTreeSet<(BodyHandle, BodyHandle)> {
        let mut touching = BTreeSet::new();

        for i in 0..self.bodies.len() {
            if self.bodies[i].is_static {
                continue;
            }
            for j in 0..self.bodies.len() {
                if i == j {
                    continue;
                }
                let other = &self.bodies[j];
                let Some(other_rect) = other.rect() else {
                    continue;
                };
                let other_static = other.is_static;
                let body = &self.bodies[i];

                let (hit, normal, depth) = match body.shape {
                    Shape::Circle { radius } => {
                        let c = circle_rect_collision(body.pos, radius + CONTACT_SLOP, &other_rect);
                        (c.hit, c.normal, c.penetration - CONTACT_SLOP)
                    }
                    // Falling walls only land on fixed bodies
                    Shape::Rect { .. } if other_static => {
                        let Some(rect) = body.rect() else { continue };
                        let c = rect_rect_collision(&rect, &other_rect);
                        (c.hit, c.normal, c.penetration)
                    }
                    Shape::Rect { .. } => continue,
                };
                if !hit {
                    continue;
                }

                let (a, b) = (body.handle, other.handle);
                touching.insert((a.min(b), a.max(b)));

                if depth > 0.0 {
                    let body = &mut self.bodies[i];
                    body.pos += normal * depth;
                    body.vel = reflect_velocity(body.vel, normal, RESTITUTION);
                }
            }
        }

        touching
    }
}

impl Physics for World {
    fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn add_static_rect(&mut self, rect: Rect, role: BodyRole) -> BodyHandle {
        self.insert(
            role,
            Shape::Rect {
                half_extents: rect.half_extents(),
            },
            rect.center,
            true,
        )
    }

    fn add_dynamic_circle(&mut self, circle: Circle, role: BodyRole) -> BodyHandle {
        self.insert(
            role,
            Shape::Circle {
                radius: circle.radius,
            },
            circle.center,
            false,
        )
    }

    fn velocity(&self, body: BodyHandle) -> Option<Vec2> {
        self.body(body).map(|b| b.vel)
    }

    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        if let Some(b) = self.body_mut(body) {
            b.vel = velocity;
        }
    }

    fn set_static(&mut self, body: BodyHandle, is_static: bool) {
        if let Some(b) = self.body_mut(body) {
            b.is_static = is_static;
            if is_static {
                b.vel = Vec2::ZERO;
            }
        }
    }

    fn release_role(&mut self, role: BodyRole) -> usize {
        let mut released = 0;
        for body in self.bodies.iter_mut() {
            if body.role == role && body.is_static {
                body.is_static = false;
                released += 1;
            }
        }
        released
    }

    fn step(&mut self, dt: f32) -> Vec<ContactPair> {
        let frames = dt * FRAME_RATE;

        // Split the step so nothing moves further than MAX_SUBSTEP_TRAVEL
        let accel = self.gravity * GRAVITY_SCALE * frames;
        let travel = self
            .bodies
            .iter()
            .filter(|b| !b.is_static)
            .map(|b| (b.vel + accel).length() * frames)
            .fold(0.0_f32, f32::max);
        let substeps = ((travel / MAX_SUBSTEP_TRAVEL).ceil() as u32).clamp(1, MAX_PHYSICS_SUBSTEPS);

        let mut touching = BTreeSet::new();
        for _ in 0..substeps {
            self.integrate(frames / substeps as f32);
            touching.extend(self.resolve());
        }

        // Set iteration is ordered, so events come out sorted by handle pair
        let started: Vec<ContactPair> = touching
            .difference(&self.contacts)
            .filter_map(|&(a, b)| {
                let roles = (self.body(a)?.role, self.body(b)?.role);
                Some(ContactPair { a, b, roles })
            })
            .collect();

        self.contacts = touching;
        started
    }
}
