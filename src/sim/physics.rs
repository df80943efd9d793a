//! Per-tick motion: gravity, speed clamp, rotation, integration, wrap
//!
//! One tick is one unit of time, so velocities are in units per tick and
//! integration is a plain `pos += vel`.

use glam::Vec2;

use super::state::{Attractor, Craft, Obstacle};
use crate::consts::*;

/// Velocity change from every attractor acting on a body at `pos`.
///
/// Inverse-square pull, summed over all attractors. Distances below
/// [`MIN_GRAVITY_DISTANCE`] are clamped so a body sitting on an attractor's
/// center gets a large but finite kick.
pub fn gravity_delta(pos: Vec2, attractors: &[Attractor], gravity: f32) -> Vec2 {
    attractors
        .iter()
        .map(|attractor| {
            let to_attractor = attractor.pos - pos;
            let distance = to_attractor.length().max(MIN_GRAVITY_DISTANCE);
            let force = gravity * attractor.mass / (distance * distance);
            to_attractor.normalize_or_zero() * force
        })
        .sum()
}

/// Rescale `vel` to `max_speed` if it's faster, keeping its direction.
#[inline]
pub fn clamp_speed(vel: Vec2, max_speed: f32) -> Vec2 {
    let speed = vel.length();
    if speed > max_speed {
        vel / speed * max_speed
    } else {
        vel
    }
}

/// Toroidal wrap of a single coordinate into [0, max).
///
/// Crossing below 0 teleports to the far edge (just inside `max`), crossing
/// past `max` teleports to 0.
#[inline]
pub fn wrap_axis(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    if value < 0.0 {
        far_edge(max)
    } else if value >= max {
        0.0
    } else {
        value
    }
}

/// Largest coordinate strictly below `max`
#[inline]
fn far_edge(max: f32) -> f32 {
    (max - max * f32::EPSILON).max(0.0)
}

/// Wrap a position onto the torus defined by `bounds`
#[inline]
pub fn wrap_position(pos: Vec2, bounds: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, bounds.x), wrap_axis(pos.y, bounds.y))
}

/// Advance the craft one tick
pub fn step_craft(craft: &mut Craft, attractors: &[Attractor], gravity: f32, bounds: Vec2) {
    craft.vel += gravity_delta(craft.pos, attractors, gravity);
    craft.vel = clamp_speed(craft.vel, MAX_SPEED);
    craft.rotate();
    craft.pos = wrap_position(craft.pos + craft.vel, bounds);
}

/// Advance one obstacle one tick.
///
/// Gravity only applies once the difficulty gate is open. Obstacles are not
/// speed-capped and do not wrap; they simply drift off-screen.
pub fn step_obstacle(obstacle: &mut Obstacle, attractors: &[Attractor], gravity: f32, gated_in: bool) {
    if gated_in {
        obstacle.vel += gravity_delta(obstacle.pos, attractors, gravity);
    }
    obstacle.pos += obstacle.vel;
}
