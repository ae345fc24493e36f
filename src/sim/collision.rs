//! Contact tests for the shapes in the maze world
//!
//! Only two pairings matter: the ball against a rectangle, and a falling wall
//! against a fixed rectangle. Normals point out of the rectangle, toward the
//! body being pushed.

use glam::Vec2;

use super::geometry::Rect;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at contact (pointing toward the moving body)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a circle against an axis-aligned rectangle
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> CollisionResult {
    let min = rect.min();
    let max = rect.max();
    let closest = center.clamp(min, max);
    let offset = center - closest;
    let dist_sq = offset.length_squared();

    if dist_sq > 1e-8 {
        if dist_sq >= radius * radius {
            return CollisionResult::miss();
        }
        let dist = dist_sq.sqrt();
        return CollisionResult {
            hit: true,
            normal: offset / dist,
            penetration: radius - dist,
        };
    }

    // Center is inside the rectangle: leave through the nearest face
    let to_min = center - min;
    let to_max = max - center;
    let faces = [
        (to_min.x, Vec2::NEG_X),
        (to_max.x, Vec2::X),
        (to_min.y, Vec2::NEG_Y),
        (to_max.y, Vec2::Y),
    ];
    let (depth, normal) = faces
        .into_iter()
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or((0.0, Vec2::Y));

    CollisionResult {
        hit: true,
        normal,
        penetration: radius + depth,
    }
}

/// Check rectangle `a` against rectangle `b`; the normal pushes `a` out of `b`
pub fn rect_rect_collision(a: &Rect, b: &Rect) -> CollisionResult {
    let delta = a.center - b.center;
    let overlap = a.half_extents() + b.half_extents() - delta.abs();
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return CollisionResult::miss();
    }

    let (normal, penetration) = if overlap.x < overlap.y {
        (Vec2::new(sign(delta.x), 0.0), overlap.x)
    } else {
        (Vec2::new(0.0, sign(delta.y)), overlap.y)
    };

    CollisionResult {
        hit: true,
        normal,
        penetration,
    }
}

#[inline]
fn sign(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - (1 + e)(v·n)n, applied only when moving
/// into the surface. `restitution` of 1.0 is a perfect bounce.
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let into = velocity.dot(normal);
    if into >= 0.0 {
        return velocity;
    }
    velocity - (1.0 + restitution) * into * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_touches_rect_side() {
        let wall = Rect::new(100.0, 50.0, 4.0, 100.0);
        // Ball just left of the wall (wall spans x 98..102)
        let result = circle_rect_collision(Vec2::new(92.0, 50.0), 8.0, &wall);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_X);
        assert!((result.penetration - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_circle_misses_rect() {
        let wall = Rect::new(100.0, 50.0, 4.0, 100.0);
        let result = circle_rect_collision(Vec2::new(80.0, 50.0), 8.0, &wall);
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_corner_contact() {
        let block = Rect::new(0.0, 0.0, 10.0, 10.0);
        let result = circle_rect_collision(Vec2::new(8.0, 8.0), 5.0, &block);
        assert!(result.hit);
        // Closest corner is (5, 5)
        assert!((result.penetration - (5.0 - 18.0_f32.sqrt())).abs() < 1e-4);
        assert!(result.normal.x > 0.0 && result.normal.y > 0.0);
    }

    #[test]
    fn test_circle_center_inside() {
        let block = Rect::new(0.0, 0.0, 20.0, 10.0);
        // Nearest face is the top (y = -5)
        let result = circle_rect_collision(Vec2::new(1.0, -4.0), 3.0, &block);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_Y);
        assert!((result.penetration - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_rect_rect() {
        let floor = Rect::new(50.0, 100.0, 100.0, 2.0);
        let falling = Rect::new(50.0, 98.0, 40.0, 4.0);
        let result = rect_rect_collision(&falling, &floor);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_Y);
        assert!((result.penetration - 1.0).abs() < 1e-5);

        let apart = Rect::new(50.0, 90.0, 40.0, 4.0);
        assert!(!rect_rect_collision(&apart, &floor).hit);
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::NEG_X, 1.0);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);

        // Inelastic: normal component removed
        let stopped = reflect_velocity(Vec2::new(3.0, 4.0), Vec2::NEG_Y, 0.0);
        assert_eq!(stopped, Vec2::new(3.0, 0.0));

        // Separating velocity is left alone
        let away = reflect_velocity(Vec2::new(-5.0, 0.0), Vec2::NEG_X, 1.0);
        assert_eq!(away, Vec2::new(-5.0, 0.0));
    }
}
