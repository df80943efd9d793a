//! Thrust exhaust particles
//!
//! Purely cosmetic: they fly straight, shrink, and disappear.

use rand::Rng;

use super::state::{Craft, Particle, Rgba};
use crate::consts::*;
use crate::{heading_vector, polar_to_cartesian};

/// Emit one exhaust burst out the back of the craft.
///
/// Each particle heads roughly opposite the nose (within ±π/8) and starts one
/// craft radius behind the center.
pub fn spawn_exhaust<R: Rng>(rng: &mut R, craft: &Craft) -> Vec<Particle> {
    (0..PARTICLE_COUNT)
        .map(|_| {
            let angle = craft.heading
                + std::f32::consts::PI
                + rng.random_range(-EXHAUST_HALF_SPREAD..=EXHAUST_HALF_SPREAD);
            Particle {
                pos: craft.pos + polar_to_cartesian(craft.radius, angle),
                radius: rng.random_range(PARTICLE_MIN_RADIUS..PARTICLE_MAX_RADIUS),
                color: Rgba::white(rng.random::<f32>()),
                angle,
                speed: rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED),
            }
        })
        .collect()
}

/// Move and shrink every particle, dropping the ones that have faded out.
pub fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += heading_vector(particle.angle) * particle.speed;
        particle.radius -= PARTICLE_DECAY;
    }
    particles.retain(|p| p.radius >= 0.0);
}
