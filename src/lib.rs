//! Dodge Blitz - a top-down arena survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `game`: Run lifecycle orchestration and external interfaces
//! - `render`: Frame snapshots consumed by a presentation layer
//! - `input`: Movement/shoot intent snapshot
//! - `settings`: Visual/accessibility preferences
//! - `highscores`: Best-score persistence

pub mod game;
pub mod highscores;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use game::{Game, HudSink, RunStats};
pub use highscores::HighScore;
pub use settings::Settings;

use glam::Vec2;

/// Game balance constants
pub mod consts {
    /// Target simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Arena dimensions before any resize
    pub const BASE_ARENA_WIDTH: f32 = 600.0;
    pub const BASE_ARENA_HEIGHT: f32 = 500.0;
    /// Projectiles despawn this far outside the arena
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 18.0;
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_MAX_HEALTH: i32 = 6;
    /// Player stays this far inside the arena edge
    pub const PLAYER_CLAMP_MARGIN: f32 = 10.0;
    /// Damage immunity window after any hit
    pub const INVULNERABILITY_TICKS: u32 = 60;
    /// Speed factor applied to each axis of diagonal movement
    pub const DIAGONAL_FACTOR: f32 = 0.707;

    /// Weapon defaults
    pub const PROJECTILE_SPEED: f32 = 6.0;
    /// Fixed collision radius of player projectiles
    pub const PROJECTILE_HIT_RADIUS: f32 = 5.0;
    pub const SHOT_COOLDOWN_TICKS: f32 = 15.0;
    pub const MAX_HEAT: f32 = 100.0;
    pub const HEAT_PER_SHOT: f32 = 15.0;
    /// Heat drained per tick
    pub const HEAT_DECAY: f32 = 1.0;

    /// Powerup modifiers
    pub const AK47_COOLDOWN_FACTOR: f32 = 0.5;
    pub const AK47_HEAT_FACTOR: f32 = 0.7;
    pub const AK47_SPEED_FACTOR: f32 = 1.5;
    pub const AK47_DAMAGE: i32 = 2;
    pub const PENTAGRAM_DAMAGE_FACTOR: i32 = 2;
    pub const SPEED_BOOST_FACTOR: f32 = 1.6;
    pub const POWERUP_DURATION_TICKS: u32 = 600;
    /// Pickup reach beyond the player radius
    pub const POWERUP_PICKUP_RADIUS: f32 = 25.0;
    /// Fraction of the angular error a homing projectile closes per tick
    pub const HOMING_TURN_FRACTION: f32 = 0.1;

    /// Enemy base stats per variant
    pub const FLY_RADIUS: f32 = 15.0;
    pub const FLY_HEALTH: i32 = 3;
    pub const SPEEDER_RADIUS: f32 = 13.0;
    pub const SPEEDER_HEALTH: i32 = 2;
    pub const SHOOTER_RADIUS: f32 = 16.0;
    pub const SHOOTER_SPEED: f32 = 0.8;
    pub const SHOOTER_HEALTH: i32 = 5;

    /// Fly ranged attack
    pub const FLY_PROJECTILE_SPEED: f32 = 3.2;
    /// Fly projectiles expire after traveling this far
    pub const FLY_PROJECTILE_RANGE: f32 = 660.0;
    pub const ENEMY_PROJECTILE_RADIUS: f32 = 6.0;

    /// Shooter engagement band and burst fire
    pub const SHOOTER_NEAR_BAND: f32 = 150.0;
    pub const SHOOTER_FAR_BAND: f32 = 250.0;
    pub const SHOOTER_COOLDOWN_TICKS: u32 = 90;
    pub const SHOOTER_PROJECTILE_SPEED: f32 = 4.5;
    pub const BURST_COUNT: u32 = 3;
    pub const BURST_SPACING_TICKS: u32 = 8;

    /// Spawn scheduler
    pub const SPAWN_EDGE_OFFSET: f32 = 20.0;
    pub const BASE_SPAWN_RATE: u32 = 120;
    pub const MIN_SPAWN_RATE: u32 = 30;
    pub const SPAWN_RAMP_INTERVAL: u32 = 300;
    pub const SPAWN_RAMP_STEP: u32 = 2;

    /// Combo and rewards
    pub const COMBO_WINDOW_MS: f64 = 2000.0;
    pub const COMBO_TIMER_TICKS: u32 = 120;
    pub const COMBO_MULTIPLIER_STEP: f32 = 0.1;
    /// A lapsed combo above this count announces the loss
    pub const COMBO_LOST_THRESHOLD: u32 = 3;
    /// Bonus coins granted every this many streak kills
    pub const STREAK_BONUS_INTERVAL: u32 = 5;

    /// Coins
    pub const HELMET_SIZE: f32 = 22.0;
    pub const HELMET_LIFE_TICKS: u32 = 480;
    /// Dropped coins scatter within +/- half of this
    pub const COIN_SCATTER: f32 = 20.0;

    /// Feedback timing
    pub const HIT_FLASH_TICKS: u32 = 10;
    pub const HITMARKER_LIFE_TICKS: u32 = 20;
    pub const POPUP_LIFE_TICKS: u32 = 60;
    pub const PARTICLE_DRAG: f32 = 0.95;
    pub const SHAKE_DECAY: f32 = 0.9;
}

/// Normalize an angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector from `from` toward `to`, or None when the points coincide.
///
/// Coincident points would yield a zero-length direction; callers treat
/// that as a no-op for the tick rather than an error.
#[inline]
pub fn direction_between(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let dist = delta.length();
    if dist > 0.0 { Some(delta / dist) } else { None }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}
