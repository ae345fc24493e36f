//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::geometry::Rect;
use crate::sim::policy::BodyRole;
use crate::sim::world::{Shape, World};

/// Segments used for the ball outline
const BALL_SEGMENTS: u32 = 32;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let min = rect.min();
    let max = rect.max();
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

pub fn role_color(role: BodyRole) -> [f32; 4] {
    match role {
        BodyRole::Wall => colors::WALL,
        BodyRole::Boundary => colors::BOUNDARY,
        BodyRole::Goal => colors::GOAL,
        BodyRole::Ball => colors::BALL,
    }
}

/// Triangles for every body in the world, in screen coordinates
///
/// Drawn in insertion order, so the ball (added last) ends up on top.
pub fn scene_vertices(world: &World) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(world.bodies().len() * 6 + BALL_SEGMENTS as usize * 3);

    for body in world.bodies() {
        let color = role_color(body.role);
        match body.shape {
            Shape::Rect { half_extents } => {
                let r = Rect {
                    center: body.pos,
                    size: half_extents * 2.0,
                };
                vertices.extend_from_slice(&rect(&r, color));
            }
            Shape::Circle { radius } => {
                vertices.extend(circle(body.pos, radius, color, BALL_SEGMENTS));
            }
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Circle;
    use crate::sim::world::Physics;

    #[test]
    fn test_rect_corners() {
        let verts = rect(&Rect::new(10.0, 20.0, 4.0, 8.0), colors::WALL);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().all(|&x| x == 8.0 || x == 12.0));
        assert!(ys.iter().all(|&y| y == 16.0 || y == 24.0));
        assert!(verts.iter().all(|v| v.color == colors::WALL));
    }

    #[test]
    fn test_circle_stays_on_radius() {
        let verts = circle(Vec2::new(5.0, 5.0), 2.0, colors::BALL, 16);
        assert_eq!(verts.len(), 48);
        for v in &verts {
            let d = Vec2::new(v.position[0] - 5.0, v.position[1] - 5.0).length();
            assert!(d < 1e-5 || (d - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_scene_vertex_count_and_colors() {
        let mut world = World::new(Vec2::ZERO);
        world.add_static_rect(Rect::new(0.0, 0.0, 10.0, 2.0), BodyRole::Boundary);
        world.add_static_rect(Rect::new(5.0, 5.0, 10.0, 4.0), BodyRole::Wall);
        world.add_static_rect(Rect::new(8.0, 8.0, 3.0, 3.0), BodyRole::Goal);
        world.add_dynamic_circle(
            Circle {
                center: Vec2::new(2.0, 2.0),
                radius: 1.0,
            },
            BodyRole::Ball,
        );

        let verts = scene_vertices(&world);
        assert_eq!(verts.len(), 3 * 6 + BALL_SEGMENTS as usize * 3);
        assert_eq!(verts[0].color, colors::BOUNDARY);
        assert_eq!(verts[6].color, colors::WALL);
        assert_eq!(verts[12].color, colors::GOAL);
        assert_eq!(verts[verts.len() - 1].color, colors::BALL);
    }
}
