//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{craft_collision, remove_consumed_obstacles};
use super::particles::{spawn_exhaust, update_particles};
use super::physics::{step_craft, step_obstacle};
use super::state::{GameEvent, GamePhase, GameState};
use crate::settings::Settings;

/// Control signals collected since the previous tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// New rotation rate (radians per tick); `None` keeps the current one
    pub rotation: Option<f32>,
    /// Thrust presses, each one an impulse plus an exhaust burst
    pub thrusts: u32,
}

impl TickInput {
    /// Forget one-shot signals after they've been applied
    pub fn clear_one_shots(&mut self) {
        self.rotation = None;
        self.thrusts = 0;
    }
}

/// Advance the game state by one tick.
///
/// Order: control signals, craft motion, craft collisions (terminal, ends the
/// tick), particles, obstacles, score.
pub fn tick(state: &mut GameState, input: &TickInput, settings: &Settings) {
    state.events.clear();
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;

    if let Some(rate) = input.rotation {
        state.craft.rotation = rate;
    }
    for _ in 0..input.thrusts {
        apply_thrust(state, settings.boost_speed);
    }

    step_craft(
        &mut state.craft,
        &state.attractors,
        settings.gravity,
        state.bounds,
    );

    if let Some(cause) = craft_collision(&state.craft, &state.attractors, &state.obstacles) {
        state.end(cause);
        return;
    }

    update_particles(&mut state.particles);

    let gated_in = state.difficulty_raised();
    if gated_in && state.score == crate::consts::SCORE_THRESHOLD {
        log::info!("Score {} reached, obstacles now feel gravity", state.score);
        state.events.push(GameEvent::DifficultyRaised);
    }

    for obstacle in &mut state.obstacles {
        step_obstacle(obstacle, &state.attractors, settings.gravity, gated_in);
    }
    let removed = remove_consumed_obstacles(&mut state.obstacles, &state.attractors);
    if removed > 0 {
        log::debug!("{} obstacle(s) consumed, {} left", removed, state.obstacles.len());
        state.events.push(GameEvent::ObstacleDestroyed {
            remaining: state.obstacles.len(),
        });
    }

    if state.score_armed {
        state.score += 1;
    }
}

/// One boost: impulse along the heading, exhaust burst, and scoring starts.
pub fn apply_thrust(state: &mut GameState, boost_speed: f32) {
    state.craft.boost(boost_speed);
    let craft = state.craft.clone();
    let burst = spawn_exhaust(state.rng_mut(), &craft);
    state.particles.extend(burst);

    if !state.score_armed {
        log::debug!("First thrust, scoring armed");
        state.score_armed = true;
    }
}
