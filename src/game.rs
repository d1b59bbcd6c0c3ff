//! Run lifecycle orchestration
//!
//! [`Game`] owns the world and mediates every external interface: the
//! input snapshot goes in, frame snapshots and HUD/game-over
//! notifications come out. The host drives it with one `step` per
//! frame from its own scheduling primitive; a finished or un-started
//! run makes `step` a no-op.

use crate::input::InputState;
use crate::render::RenderFrame;
use crate::settings::Settings;
use crate::sim::{self, GameEvent, RunPhase, World};

pub use crate::sim::RunStats;

/// Receives plain-integer HUD values on every change, unbatched.
pub trait HudSink {
    fn coins_changed(&mut self, coins: u32);
    fn kills_changed(&mut self, kills: u32);
    fn health_changed(&mut self, health: i32, max: i32);
}

/// Sink that ignores all HUD updates (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullHudSink;

impl HudSink for NullHudSink {
    fn coins_changed(&mut self, _coins: u32) {}
    fn kills_changed(&mut self, _kills: u32) {}
    fn health_changed(&mut self, _health: i32, _max: i32) {}
}

/// Invoked exactly once per run when health reaches zero
pub type GameOverHandler = Box<dyn FnMut(RunStats)>;

/// The game orchestrator
pub struct Game {
    world: World,
    settings: Settings,
    hud: Box<dyn HudSink>,
    on_game_over: GameOverHandler,
}

impl Game {
    pub fn new(
        seed: u64,
        settings: Settings,
        hud: Box<dyn HudSink>,
        on_game_over: GameOverHandler,
    ) -> Self {
        log::info!("new game, seed {seed}");
        let mut game = Self {
            world: World::new(seed),
            settings,
            hud,
            on_game_over,
        };
        // Seed the HUD with the initial counters.
        game.world.reset();
        game.dispatch_events();
        game
    }

    /// Full state reset; the next `start_run` begins a fresh run.
    pub fn prepare_for_new_run(&mut self) {
        log::info!("preparing new run");
        self.world.reset();
        self.dispatch_events();
    }

    /// Begin ticking. No-op if already running; a finished run must be
    /// reset first.
    pub fn start_run(&mut self) {
        match self.world.phase {
            RunPhase::Running => {}
            RunPhase::Ready => {
                log::info!("run started");
                self.world.phase = RunPhase::Running;
            }
            RunPhase::GameOver => {
                log::warn!("start_run on a finished run; call prepare_for_new_run first");
            }
        }
    }

    /// Advance one tick with the given input and host timestamp, then
    /// deliver any notifications it produced.
    pub fn step(&mut self, input: &InputState, now_ms: f64) {
        sim::tick(&mut self.world, input, now_ms);
        self.dispatch_events();
    }

    fn dispatch_events(&mut self) {
        for event in self.world.events.drain(..) {
            match event {
                GameEvent::CoinsChanged(coins) => self.hud.coins_changed(coins),
                GameEvent::KillsChanged(kills) => self.hud.kills_changed(kills),
                GameEvent::HealthChanged { health, max } => {
                    self.hud.health_changed(health, max)
                }
                GameEvent::GameOver(stats) => (self.on_game_over)(stats),
            }
        }
    }

    /// Current counters, readable at any time
    pub fn get_stats(&self) -> RunStats {
        self.world.stats()
    }

    /// Rescale the play field for a viewport change
    pub fn resize(&mut self, scale_x: f32, scale_y: f32) {
        self.world.resize(scale_x, scale_y);
    }

    /// Snapshot for the render sink
    pub fn frame(&self) -> RenderFrame {
        RenderFrame::capture(&self.world, &self.settings)
    }

    pub fn is_running(&self) -> bool {
        self.world.phase == RunPhase::Running
    }

    pub fn phase(&self) -> RunPhase {
        self.world.phase
    }

    /// Direct world access for tests and tooling
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
