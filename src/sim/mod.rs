//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick = one unit of time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod field;
pub mod particles;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, craft_collision, obstacle_consumed, remove_consumed_obstacles};
pub use field::{candidate_positions, generate_attractors, generate_obstacles};
pub use particles::{spawn_exhaust, update_particles};
pub use physics::{clamp_speed, gravity_delta, step_craft, step_obstacle, wrap_position};
pub use state::{
    Attractor, CollisionCause, Craft, GameEvent, GamePhase, GameState, Hsla, OBSTACLE_COLOR,
    Obstacle, Particle, Rgba,
};
pub use tick::{TickInput, apply_thrust, tick};
