//! Session controller
//!
//! Owns the [`GameState`] for its whole lifetime and is the only thing the
//! outside world talks to:
//! - lifecycle: [`Session::start`], [`Session::reset`], [`Session::on_game_over`]
//! - control signals: [`Session::set_rotation`], [`Session::thrust`]
//! - configuration: [`Session::update_setting`], [`Session::set_settings`]
//! - the fixed-rate timer: [`Session::update`], which hands a [`Snapshot`] to a
//!   [`FrameSink`] after every tick
//!
//! Control signals are only listened to while Running. Entering Running
//! subscribes, leaving it unsubscribes; anything that arrives in between is
//! dropped.

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::error::{SessionError, SessionResult, SettingsResult};
use crate::settings::Settings;
use crate::sim::{
    Attractor, Craft, GameEvent, GamePhase, GameState, Obstacle, Particle, TickInput, tick,
};

/// Turn direction from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Straight,
    Right,
}

impl Turn {
    /// Signed rotation rate for this direction
    pub fn rate(self, turn_speed: f32) -> f32 {
        match self {
            Turn::Left => -turn_speed,
            Turn::Straight => 0.0,
            Turn::Right => turn_speed,
        }
    }
}

/// Read-only view of one frame, handed to the renderer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub bounds: Vec2,
    pub craft: &'a Craft,
    pub attractors: &'a [Attractor],
    pub obstacles: &'a [Obstacle],
    pub particles: &'a [Particle],
    pub score: u64,
    pub score_armed: bool,
    pub game_over: bool,
}

/// Rendering collaborator
pub trait FrameSink {
    fn present(&mut self, frame: &Snapshot<'_>);
}

/// Sink for hosts that only poll [`Session::snapshot`]
impl FrameSink for () {
    fn present(&mut self, _frame: &Snapshot<'_>) {}
}

type GameOverCallback = Box<dyn FnMut(u64)>;

/// One player's game, from start button to game-over dialog and back
pub struct Session {
    state: GameState,
    settings: Settings,
    /// Signals queued for the next tick
    input: TickInput,
    /// Control-signal subscription; only true while Running
    listening: bool,
    accumulator: f32,
    on_game_over: Option<GameOverCallback>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.state.phase)
            .field("score", &self.state.score)
            .field("settings", &self.settings)
            .field("listening", &self.listening)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Idle session on the default play area
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::with_bounds(settings, seed, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Idle session on a `width` x `height` play area
    pub fn with_bounds(settings: Settings, seed: u64, width: f32, height: f32) -> Self {
        Self::from_state(GameState::new(seed, Vec2::new(width, height)), settings)
    }

    /// Take ownership of a prepared game, picking up in whatever phase it is in.
    ///
    /// Used to replay a saved position or set up a scripted scenario. Control
    /// signals are attached only if the game is already Running.
    pub fn from_state(state: GameState, settings: Settings) -> Self {
        let listening = state.phase == GamePhase::Running;
        if listening {
            log::debug!("Resuming running game at tick {}", state.time_ticks);
        }
        Self {
            state,
            settings,
            input: TickInput::default(),
            listening,
            accumulator: 0.0,
            on_game_over: None,
        }
    }

    /// Register the terminal callback, called once per game over with the final score
    pub fn on_game_over(&mut self, callback: impl FnMut(u64) + 'static) {
        self.on_game_over = Some(Box::new(callback));
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether control signals are currently accepted
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Read-only view of the simulation state, for tests and tooling
    pub fn state(&self) -> &GameState {
        &self.state
    }

    // --- Lifecycle ---

    /// Idle → Running: generate the field and start ticking.
    pub fn start(&mut self) -> SessionResult<()> {
        if self.state.phase != GamePhase::Idle {
            return Err(self.reject("start"));
        }
        self.enter_running();
        Ok(())
    }

    /// Over → Running with a freshly generated field.
    pub fn reset(&mut self) -> SessionResult<()> {
        if self.state.phase != GamePhase::Over {
            return Err(self.reject("reset"));
        }
        self.state.reseed();
        self.enter_running();
        Ok(())
    }

    fn reject(&self, signal: &'static str) -> SessionError {
        let err = SessionError::InvalidTransition {
            from: self.state.phase,
            signal,
        };
        log::warn!("{}", err);
        err
    }

    fn enter_running(&mut self) {
        self.state.begin();
        self.input = TickInput::default();
        self.accumulator = 0.0;
        self.subscribe();
    }

    fn enter_over(&mut self, score: u64) {
        self.unsubscribe();
        self.accumulator = 0.0;
        if let Some(callback) = self.on_game_over.as_mut() {
            callback(score);
        }
    }

    fn subscribe(&mut self) {
        self.listening = true;
        log::debug!("Control signals attached");
    }

    fn unsubscribe(&mut self) {
        self.listening = false;
        self.input = TickInput::default();
        log::debug!("Control signals detached");
    }

    // --- Control signals ---

    /// Key down/up on a turn key
    pub fn set_rotation(&mut self, turn: Turn) {
        if !self.listening {
            log::debug!("Dropped rotation signal while {:?}", self.state.phase);
            return;
        }
        self.input.rotation = Some(turn.rate(self.settings.turn_speed));
    }

    /// Thrust key: impulse, exhaust burst, and scoring starts
    pub fn thrust(&mut self) {
        if !self.listening {
            log::debug!("Dropped thrust signal while {:?}", self.state.phase);
            return;
        }
        self.input.thrusts += 1;
    }

    // --- Configuration ---

    /// Replace all tunables at once
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Update one tunable from the settings panel's raw text
    pub fn update_setting(&mut self, name: &str, raw: &str) -> SettingsResult<()> {
        self.settings.set(name, raw)
    }

    // --- Timer ---

    /// Run exactly one tick and present the result. Returns false if not Running.
    pub fn step(&mut self, sink: &mut impl FrameSink) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }

        tick(&mut self.state, &self.input, &self.settings);
        self.input.clear_one_shots();

        let game_over = self.state.events.iter().find_map(|event| match event {
            GameEvent::CraftDestroyed { score, .. } => Some(*score),
            _ => None,
        });

        sink.present(&self.snapshot());

        if let Some(score) = game_over {
            self.enter_over(score);
        }
        true
    }

    /// Advance wall-clock time by `elapsed` seconds, ticking at [`TICK_RATE`].
    ///
    /// Returns the number of ticks run. Stops as soon as the session leaves
    /// Running; a backlog beyond [`MAX_SUBSTEPS`] is dropped.
    pub fn update(&mut self, elapsed: f32, sink: &mut impl FrameSink) -> u32 {
        if self.state.phase != GamePhase::Running {
            return 0;
        }

        self.accumulator += elapsed.max(0.0);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
            if !self.step(sink) || self.state.phase != GamePhase::Running {
                break;
            }
        }

        if self.accumulator >= SIM_DT {
            log::warn!(
                "Dropping {:.0} ticks of backlog",
                (self.accumulator / SIM_DT).floor()
            );
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Current frame for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.state.phase,
            bounds: self.state.bounds,
            craft: &self.state.craft,
            attractors: &self.state.attractors,
            obstacles: &self.state.obstacles,
            particles: &self.state.particles,
            score: self.state.score,
            score_armed: self.state.score_armed,
            game_over: self.state.is_over(),
        }
    }

    /// Events produced by the most recent tick
    pub fn last_events(&self) -> &[GameEvent] {
        &self.state.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct CountingSink {
        frames: u32,
        last_score: u64,
    }

    impl FrameSink for CountingSink {
        fn present(&mut self, frame: &Snapshot<'_>) {
            self.frames += 1;
            self.last_score = frame.score;
        }
    }

    fn cleared_state() -> GameState {
        let mut state = GameState::new(4242, Vec2::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));
        state.begin();
        state.attractors.clear();
        state.obstacles.clear();
        state
    }

    fn cleared_session() -> Session {
        Session::from_state(cleared_state(), Settings::default())
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut session = Session::new(Settings::default(), 1);
        assert_eq!(session.phase(), GamePhase::Idle);
        assert!(!session.is_listening());
        assert!(session.reset().is_err());

        session.start().unwrap();
        assert_eq!(session.phase(), GamePhase::Running);
        assert!(session.is_listening());
        assert_eq!(
            session.start(),
            Err(SessionError::InvalidTransition {
                from: GamePhase::Running,
                signal: "start"
            })
        );
        assert!(session.reset().is_err());
    }

    #[test]
    fn test_signals_dropped_while_idle() {
        let mut session = Session::new(Settings::default(), 1);
        session.thrust();
        session.set_rotation(Turn::Left);
        assert_eq!(session.input, TickInput::default());
        session.start().unwrap();
        session.step(&mut ());
        assert!(!session.state().score_armed);
        assert_eq!(session.state().craft.rotation, 0.0);
    }

    #[test]
    fn test_update_runs_fixed_ticks() {
        let mut session = cleared_session();
        let mut sink = CountingSink::default();

        // Half a tick: nothing yet
        assert_eq!(session.update(SIM_DT * 0.5, &mut sink), 0);
        // Another 2.5 ticks of time → 3 ticks total
        assert_eq!(session.update(SIM_DT * 2.5 + 1e-4, &mut sink), 3);
        assert_eq!(sink.frames, 3);
        assert_eq!(session.state().time_ticks, 3);
    }

    #[test]
    fn test_update_caps_substeps() {
        let mut session = cleared_session();
        let mut sink = CountingSink::default();
        assert_eq!(session.update(1.0, &mut sink), MAX_SUBSTEPS);
        // Backlog was dropped
        assert_eq!(session.update(0.0, &mut sink), 0);
    }

    #[test]
    fn test_thrust_arms_scoring_on_next_tick() {
        let mut session = cleared_session();
        let mut sink = CountingSink::default();
        session.thrust();
        session.step(&mut sink);
        assert_eq!(session.score(), 1);
        assert_eq!(sink.last_score, 1);
        assert_eq!(session.snapshot().particles.len(), PARTICLE_COUNT);
        // One-shot: the next tick doesn't boost again
        let vel = session.state().craft.vel;
        session.step(&mut sink);
        assert_eq!(session.state().craft.vel, vel);
    }

    #[test]
    fn test_rotation_uses_turn_speed_at_signal_time() {
        let mut session = cleared_session();
        session.update_setting("turn-speed", "0.25").unwrap();
        session.set_rotation(Turn::Right);
        session.step(&mut ());
        assert!((session.state().craft.heading - 0.25).abs() < 1e-6);
        session.set_rotation(Turn::Straight);
        session.step(&mut ());
        assert!((session.state().craft.heading - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_game_over_callback_once_and_reset() {
        // One thrust moves the craft 0.5 per tick along +x; the obstacle is
        // first touched on tick 31
        let mut state = cleared_state();
        let ahead = state.craft.pos + Vec2::new(40.25, 0.0);
        state.obstacles.push(Obstacle::new(ahead));
        let mut session = Session::from_state(state, Settings::default());
        let reported = Rc::new(RefCell::new(Vec::new()));
        let sink_scores = reported.clone();
        session.on_game_over(move |score| sink_scores.borrow_mut().push(score));

        session.thrust();
        for _ in 0..30 {
            session.step(&mut ());
        }
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.score(), 30);

        session.update(SIM_DT * 4.0 + 1e-4, &mut ());
        assert_eq!(session.phase(), GamePhase::Over);
        assert!(!session.is_listening());
        assert_eq!(*reported.borrow(), vec![30]);
        assert!(session.snapshot().game_over);

        // Frozen: no more ticks, signals ignored
        session.thrust();
        assert_eq!(session.update(1.0, &mut ()), 0);
        assert!(!session.step(&mut ()));
        assert_eq!(session.score(), 30);
        assert_eq!(reported.borrow().len(), 1);

        session.reset().unwrap();
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.score(), 0);
        assert!(!session.state().score_armed);
        assert!(session.state().particles.is_empty());
        assert_eq!(session.state().obstacles.len(), OBSTACLE_COUNT);
        assert_eq!(session.state().craft.vel, Vec2::ZERO);
    }

    #[test]
    fn test_settings_apply_while_over() {
        let mut session = Session::new(Settings::default(), 3);
        session.update_setting("gravity", "0.1").unwrap();
        assert_eq!(session.settings().gravity, 0.1);
        assert!(session.update_setting("gravity", "x").is_err());
        assert_eq!(session.settings().gravity, 0.1);
    }

    #[test]
    fn test_from_state_follows_phase() {
        let idle = Session::from_state(
            GameState::new(9, Vec2::new(400.0, 300.0)),
            Settings::default(),
        );
        assert_eq!(idle.phase(), GamePhase::Idle);
        assert!(!idle.is_listening());

        let mut running = cleared_session();
        assert!(running.is_listening());
        assert_eq!(
            running.start(),
            Err(SessionError::InvalidTransition {
                from: GamePhase::Running,
                signal: "start"
            })
        );
        running.thrust();
        running.step(&mut ());
        assert!(running.state().score_armed);
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = cleared_session();
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        assert!(json.contains("\"score\":0"));
        assert!(json.contains("\"phase\":\"Running\""));
    }
}
