//! Game state and core simulation types
//!
//! All gameplay state lives in one owned [`World`]; subsystem functions
//! borrow it mutably for the duration of a tick. There are no ambient
//! globals and no entity identity beyond collection membership.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

use super::combo::ComboState;
use super::fx::FxState;
use super::powerups::PowerupEffects;
use super::spawn::SpawnState;
use super::weapon::WeaponState;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// State is reset, waiting for the host to begin ticking
    Ready,
    /// Active gameplay
    Running,
    /// Health reached zero; no further ticks until the next reset
    GameOver,
}

/// Final counters reported to the host when a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub kills: u32,
    pub coins: u32,
}

/// Simulation-to-host notifications, drained by the orchestrator after
/// each tick in the order they occurred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    CoinsChanged(u32),
    KillsChanged(u32),
    HealthChanged { health: i32, max: i32 },
    GameOver(RunStats),
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Current speed; the speed powerup raises this and must restore it
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub invulnerable: bool,
    pub invulnerable_ticks: u32,
    /// Derived from input each tick, consumed by the render layer
    pub is_moving: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            invulnerable: false,
            invulnerable_ticks: 0,
            is_moving: false,
        }
    }

    /// Count down the damage-immunity window
    pub fn tick_invulnerability(&mut self) {
        if self.invulnerable {
            self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);
            if self.invulnerable_ticks == 0 {
                self.invulnerable = false;
            }
        }
    }
}

/// Variant tag plus variant-specific attack state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Chases the player and lobs ranged shots on a randomized cooldown
    Fly { shoot_timer: u32, shoot_cooldown: u32 },
    /// Fast melee chaser, no ranged attack
    Speeder,
    /// Holds an engagement band and fires bursts
    Shooter {
        shoot_timer: u32,
        burst_shots_remaining: u32,
        burst_delay: u32,
    },
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: i32,
    /// RGB, consumed by the render layer
    pub color: u32,
    /// Remaining ticks of the white hit flash (visual only)
    pub hit_flash: u32,
    pub kind: EnemyKind,
}

/// A player-fired projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    pub is_ak47: bool,
    pub is_homing: bool,
}

/// Distance-based expiry for fly projectiles
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TravelRange {
    pub max_distance: f32,
    pub traveled: f32,
}

/// An enemy-fired projectile
///
/// Fly shots carry a [`TravelRange`] and shrink as they approach it;
/// shooter shots expire only by leaving the bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyProjectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    pub radius: f32,
    pub base_radius: f32,
    pub color: u32,
    pub range: Option<TravelRange>,
}

/// Powerup pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Ak47,
    Pentagram,
    Homing,
    Speed,
}

/// A powerup pickup; persists until collected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub pos: Vec2,
    pub kind: PowerupKind,
}

/// A dropped coin; expires if left on the ground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Helmet {
    pub pos: Vec2,
    pub size: f32,
    pub life: u32,
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: RunPhase,
    pub tick_count: u64,

    /// Current arena dimensions (rescaled on resize)
    pub width: f32,
    pub height: f32,

    pub player: Player,
    /// Speed the speed-powerup expiry restores
    pub base_player_speed: f32,
    pub weapon: WeaponState,

    pub projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<EnemyProjectile>,
    pub enemies: Vec<Enemy>,
    pub helmets: Vec<Helmet>,
    pub powerups: Vec<Powerup>,

    pub effects: PowerupEffects,
    pub combo: ComboState,
    pub spawn: SpawnState,
    pub fx: FxState,

    pub coins: u32,
    pub kills: u32,

    /// Per-tick notifications, drained by the orchestrator
    pub events: Vec<GameEvent>,
}

impl World {
    /// Create a fresh world with the given seed
    pub fn new(seed: u64) -> Self {
        let center = Vec2::new(BASE_ARENA_WIDTH / 2.0, BASE_ARENA_HEIGHT / 2.0);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RunPhase::Ready,
            tick_count: 0,
            width: BASE_ARENA_WIDTH,
            height: BASE_ARENA_HEIGHT,
            player: Player::new(center),
            base_player_speed: PLAYER_SPEED,
            weapon: WeaponState::default(),
            projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            enemies: Vec::new(),
            helmets: Vec::new(),
            powerups: Vec::new(),
            effects: PowerupEffects::default(),
            combo: ComboState::default(),
            spawn: SpawnState::default(),
            fx: FxState::default(),
            coins: 0,
            kills: 0,
            events: Vec::new(),
        }
    }

    /// Restore the pre-run state, keeping the current arena dimensions
    /// and the RNG stream.
    pub fn reset(&mut self) {
        self.player = Player::new(Vec2::new(self.width / 2.0, self.height / 2.0));
        self.clamp_player();
        self.base_player_speed = PLAYER_SPEED;
        self.weapon = WeaponState::default();

        self.projectiles.clear();
        self.enemy_projectiles.clear();
        self.enemies.clear();
        self.helmets.clear();
        self.powerups.clear();

        self.effects = PowerupEffects::default();
        self.combo = ComboState::default();
        self.spawn = SpawnState::default();
        self.fx = FxState::default();

        self.coins = 0;
        self.kills = 0;
        self.tick_count = 0;
        self.phase = RunPhase::Ready;

        self.events.clear();
        self.events.push(GameEvent::CoinsChanged(0));
        self.events.push(GameEvent::KillsChanged(0));
        self.events.push(GameEvent::HealthChanged {
            health: self.player.health,
            max: self.player.max_health,
        });
    }

    /// Keep the player inside the arena margin on both axes
    pub fn clamp_player(&mut self) {
        let margin = self.player.radius + PLAYER_CLAMP_MARGIN;
        self.player.pos.x = self.player.pos.x.clamp(margin, self.width - margin);
        self.player.pos.y = self.player.pos.y.clamp(margin, self.height - margin);
    }

    /// Rescale every stored position for a viewport change, preserving
    /// relative layout. Identity and degenerate scales are no-ops.
    pub fn resize(&mut self, scale_x: f32, scale_y: f32) {
        if !scale_x.is_finite() || !scale_y.is_finite() || (scale_x == 1.0 && scale_y == 1.0) {
            return;
        }
        let scale = Vec2::new(scale_x, scale_y);

        self.width *= scale_x;
        self.height *= scale_y;

        self.player.pos *= scale;
        for proj in &mut self.projectiles {
            proj.pos *= scale;
        }
        for proj in &mut self.enemy_projectiles {
            proj.pos *= scale;
        }
        for enemy in &mut self.enemies {
            enemy.pos *= scale;
        }
        for helmet in &mut self.helmets {
            helmet.pos *= scale;
        }
        for powerup in &mut self.powerups {
            powerup.pos *= scale;
        }
        self.fx.rescale(scale);

        self.clamp_player();
    }

    /// True while a position is within the arena plus the despawn margin
    pub fn in_bounds(&self, pos: Vec2) -> bool {
        pos.x >= -OFFSCREEN_MARGIN
            && pos.x <= self.width + OFFSCREEN_MARGIN
            && pos.y >= -OFFSCREEN_MARGIN
            && pos.y <= self.height + OFFSCREEN_MARGIN
    }

    pub fn add_coins(&mut self, amount: u32) {
        self.coins += amount;
        self.events.push(GameEvent::CoinsChanged(self.coins));
    }

    pub fn record_kill(&mut self) {
        self.kills += 1;
        self.events.push(GameEvent::KillsChanged(self.kills));
    }

    pub fn stats(&self) -> RunStats {
        RunStats {
            kills: self.kills,
            coins: self.coins,
        }
    }
}
