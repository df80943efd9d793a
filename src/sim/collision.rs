//! Circle-vs-circle collision checks
//!
//! Every body in the game is a circle, so a collision is just
//! `distance < r1 + r2`. Touching exactly does not count.

use glam::Vec2;

use super::state::{Attractor, CollisionCause, Craft, Obstacle};

/// Strict overlap test between two circles
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// First thing the craft is touching, checking attractors before obstacles.
pub fn craft_collision(
    craft: &Craft,
    attractors: &[Attractor],
    obstacles: &[Obstacle],
) -> Option<CollisionCause> {
    if attractors
        .iter()
        .any(|a| circles_overlap(craft.pos, craft.radius, a.pos, a.radius))
    {
        return Some(CollisionCause::Attractor);
    }
    if obstacles
        .iter()
        .any(|o| circles_overlap(craft.pos, craft.radius, o.pos, o.radius))
    {
        return Some(CollisionCause::Obstacle);
    }
    None
}

/// Whether an obstacle has fallen into any attractor
pub fn obstacle_consumed(obstacle: &Obstacle, attractors: &[Attractor]) -> bool {
    attractors
        .iter()
        .any(|a| circles_overlap(obstacle.pos, obstacle.radius, a.pos, a.radius))
}

/// Drop every obstacle overlapping an attractor. Returns how many went.
pub fn remove_consumed_obstacles(obstacles: &mut Vec<Obstacle>, attractors: &[Attractor]) -> usize {
    let before = obstacles.len();
    obstacles.retain(|o| !obstacle_consumed(o, attractors));
    before - obstacles.len()
}
