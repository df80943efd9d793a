//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`], which the
//! session owns exclusively. Renderers only ever see borrowed snapshots.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start signal
    Idle,
    /// Ticking
    Running,
    /// Craft destroyed, waiting for reset
    Over,
}

/// What the craft ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionCause {
    Attractor,
    Obstacle,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Terminal: the session is over with this final score
    CraftDestroyed { cause: CollisionCause, score: u64 },
    /// An obstacle fell into an attractor
    ObstacleDestroyed { remaining: usize },
    /// Score crossed the threshold; obstacles now feel gravity
    DifficultyRaised,
}

/// HSL(A) color, hue in degrees and the rest as fractions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub fn to_css(&self) -> String {
        if self.alpha >= 1.0 {
            format!(
                "hsl({}, {}%, {}%)",
                self.hue,
                self.saturation * 100.0,
                self.lightness * 100.0
            )
        } else {
            format!(
                "hsla({}, {}%, {}%, {})",
                self.hue,
                self.saturation * 100.0,
                self.lightness * 100.0,
                self.alpha
            )
        }
    }
}

/// 8-bit RGB with fractional alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub fn white(alpha: f32) -> Self {
        Self {
            r: 255,
            g: 255,
            b: 255,
            a: alpha,
        }
    }

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Fill color for obstacles
pub const OBSTACLE_COLOR: &str = "#888";

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Nose direction (radians), accumulated without normalization
    pub heading: f32,
    /// Heading change per tick: -turn, 0 or +turn
    pub rotation: f32,
}

impl Craft {
    /// Craft parked at `center`, at rest, nose pointing along +x
    pub fn new(center: Vec2) -> Self {
        Self {
            pos: center,
            vel: Vec2::ZERO,
            radius: CRAFT_RADIUS,
            heading: 0.0,
            rotation: 0.0,
        }
    }

    /// Add a one-shot impulse along the current heading
    pub fn boost(&mut self, impulse: f32) {
        self.vel += crate::heading_vector(self.heading) * impulse;
    }

    pub fn rotate(&mut self) {
        self.heading += self.rotation;
    }
}

/// A fixed gravitating body (planet)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attractor {
    pub pos: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub color: Hsla,
    pub glow_color: Hsla,
}

/// A drifting hazard (asteroid)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Obstacle {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: OBSTACLE_RADIUS,
        }
    }
}

/// Exhaust particle (visual only, never collides)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgba,
    /// Travel direction (radians)
    pub angle: f32,
    /// Distance travelled per tick
    pub speed: f32,
}

/// Complete mutable state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the current field was generated from
    pub seed: u64,
    rng: Pcg32,
    /// Play area size (positions live in [0, w) x [0, h))
    pub bounds: Vec2,
    pub phase: GamePhase,
    pub score: u64,
    /// Scoring starts with the first thrust
    pub score_armed: bool,
    /// Ticks simulated since the last start/reset
    pub time_ticks: u64,
    pub craft: Craft,
    pub attractors: Vec<Attractor>,
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    /// Events from the last tick, drained by the session
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle state; the field is generated on [`GameState::begin`].
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bounds,
            phase: GamePhase::Idle,
            score: 0,
            score_armed: false,
            time_ticks: 0,
            craft: Craft::new(bounds * 0.5),
            attractors: Vec::new(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Generate a fresh field and enter Running with everything zeroed.
    ///
    /// Used for both the first start and every reset.
    pub fn begin(&mut self) {
        self.craft = Craft::new(self.bounds * 0.5);
        self.score = 0;
        self.score_armed = false;
        self.time_ticks = 0;
        self.particles.clear();
        self.events.clear();
        self.attractors = super::field::generate_attractors(&mut self.rng, self.bounds);
        self.obstacles = super::field::generate_obstacles(&mut self.rng, self.bounds);
        self.phase = GamePhase::Running;

        log::info!(
            "Session started (seed {}): {} attractors, {} obstacles",
            self.seed,
            self.attractors.len(),
            self.obstacles.len()
        );
    }

    /// Re-seed for the next session from the current generator.
    pub fn reseed(&mut self) {
        self.seed = self.rng.random();
        self.rng = Pcg32::seed_from_u64(self.seed);
    }

    /// Generator shared by field generation and particle spawns
    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Whether obstacles feel gravity yet
    pub fn difficulty_raised(&self) -> bool {
        self.score >= SCORE_THRESHOLD
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Terminal transition. Returns false if already over.
    pub fn end(&mut self, cause: CollisionCause) -> bool {
        if self.phase == GamePhase::Over {
            return false;
        }
        self.phase = GamePhase::Over;
        self.craft.rotation = 0.0;
        self.events.push(GameEvent::CraftDestroyed {
            cause,
            score: self.score,
        });
        log::info!("Craft hit {:?}, final score {}", cause, self.score);
        true
    }
}
