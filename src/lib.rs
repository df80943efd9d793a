//! Orbit Drift - A 2D orbital-flight arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, motion, collisions, particles)
//! - `session`: Lifecycle, control signals and the fixed-rate tick driver
//! - `settings`: Runtime tunables (gravity, boost, turn rate)
//! - `error`: Settings and session error types
//!
//! Drawing, keyboard wiring and UI chrome live outside this crate. They talk
//! to a [`Session`] through control signals, settings updates and read-only
//! [`session::Snapshot`]s.

pub mod error;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{SessionError, SettingsError};
pub use session::{FrameSink, Session, Snapshot};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: f32 = 60.0;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE;
    /// Maximum ticks per driver update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default play area (used when the host doesn't report a canvas size)
    pub const DEFAULT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;

    /// Craft defaults
    pub const CRAFT_RADIUS: f32 = 15.0;
    /// Speed cap in units per tick
    pub const MAX_SPEED: f32 = 5.0;

    /// Attractor (planet) defaults
    pub const ATTRACTOR_RADIUS: f32 = 40.0;
    pub const ATTRACTOR_MASS: f32 = 1500.0;
    pub const MIN_ATTRACTORS: usize = 2;
    pub const MAX_ATTRACTORS: usize = 4;
    /// Layout grid cell = min(width, height) / this
    pub const FIELD_GRID_DIVISIONS: f32 = 4.0;
    /// Distances below this are clamped before the 1/r² force
    pub const MIN_GRAVITY_DISTANCE: f32 = 1.0;

    /// Obstacle (asteroid) defaults
    pub const OBSTACLE_RADIUS: f32 = 10.0;
    pub const OBSTACLE_COUNT: usize = 10;
    /// Score at which obstacles start feeling gravity
    pub const SCORE_THRESHOLD: u64 = 4000;

    /// Exhaust particles
    pub const PARTICLE_COUNT: usize = 20;
    pub const PARTICLE_DECAY: f32 = 0.1;
    pub const PARTICLE_MIN_RADIUS: f32 = 1.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 4.0;
    pub const PARTICLE_MIN_SPEED: f32 = 5.0;
    pub const PARTICLE_MAX_SPEED: f32 = 10.0;
    /// Half-width of the exhaust cone (radians)
    pub const EXHAUST_HALF_SPREAD: f32 = std::f32::consts::PI / 8.0;

    /// Tunable defaults
    pub const DEFAULT_GRAVITY: f32 = 0.05;
    pub const DEFAULT_BOOST_SPEED: f32 = 0.5;
    pub const DEFAULT_TURN_SPEED: f32 = 0.1;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    if !angle.is_finite() {
        return 0.0;
    }
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Unit vector pointing along `theta`
#[inline]
pub fn heading_vector(theta: f32) -> Vec2 {
    polar_to_cartesian(1.0, theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        for raw in [-10.0, -PI, 0.0, PI, 3.0 * PI, 100.0] {
            let a = normalize_angle(raw);
            assert!((-PI..PI).contains(&a), "{raw} -> {a}");
        }
    }

    #[test]
    fn test_heading_vector_is_unit() {
        let v = heading_vector(1.234);
        assert!((v.length() - 1.0).abs() < 1e-6);
    }
}
