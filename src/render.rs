//! Render-facing state snapshots
//!
//! The presentation layer is a pure consumer: it receives a
//! [`RenderFrame`] per tick and never touches the world. Screen shake
//! crosses this boundary as a plain intensity number - whatever
//! transform it becomes is the sink's business.

use glam::Vec2;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{
    Enemy, EnemyProjectile, Helmet, Hitmarker, Particle, Powerup, Projectile, RunPhase, TextPopup,
    World,
};

/// Player fields the renderer needs
#[derive(Debug, Clone)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub health: i32,
    pub max_health: i32,
    pub invulnerable: bool,
    pub invulnerable_ticks: u32,
    pub is_moving: bool,
}

/// Remaining duration of each powerup effect, in whole seconds
/// (rounded up, for countdown labels)
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectTimers {
    pub ak47_secs: u32,
    pub pentagram_secs: u32,
    pub homing_secs: u32,
    pub speed_secs: u32,
}

/// Everything a frame needs, captured from the world after a tick
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub width: f32,
    pub height: f32,
    pub phase: RunPhase,

    pub player: PlayerView,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<EnemyProjectile>,
    pub powerups: Vec<Powerup>,
    pub helmets: Vec<Helmet>,
    pub particles: Vec<Particle>,
    pub hitmarkers: Vec<Hitmarker>,
    pub popups: Vec<TextPopup>,

    pub coins: u32,
    pub kills: u32,

    pub combo_count: u32,
    pub combo_timer: u32,
    pub combo_multiplier: f32,

    /// Shake intensity in display units; zero when the settings
    /// disable shake
    pub screen_shake: f32,
    /// Remaining full-screen flash ticks; zero when disabled
    pub flash: u32,
    pub slow_motion: u32,

    pub heat: f32,
    pub max_heat: f32,
    pub overheated: bool,

    pub ak47_active: bool,
    pub pentagram_active: bool,
    pub homing_active: bool,
    pub speed_active: bool,
    pub effect_timers: EffectTimers,
}

fn secs_remaining(timer: u32) -> u32 {
    timer.div_ceil(TICK_RATE)
}

impl RenderFrame {
    /// Snapshot the world, applying the visual-preference gates.
    pub fn capture(world: &World, settings: &Settings) -> Self {
        Self {
            width: world.width,
            height: world.height,
            phase: world.phase,
            player: PlayerView {
                pos: world.player.pos,
                radius: world.player.radius,
                health: world.player.health,
                max_health: world.player.max_health,
                invulnerable: world.player.invulnerable,
                invulnerable_ticks: world.player.invulnerable_ticks,
                is_moving: world.player.is_moving,
            },
            enemies: world.enemies.clone(),
            projectiles: world.projectiles.clone(),
            enemy_projectiles: world.enemy_projectiles.clone(),
            powerups: world.powerups.clone(),
            helmets: world.helmets.clone(),
            particles: if settings.particles {
                world.fx.particles.clone()
            } else {
                Vec::new()
            },
            hitmarkers: world.fx.hitmarkers.clone(),
            popups: world.fx.popups.clone(),
            coins: world.coins,
            kills: world.kills,
            combo_count: world.combo.count,
            combo_timer: world.combo.timer,
            combo_multiplier: world.combo.multiplier,
            screen_shake: if settings.effective_screen_shake() {
                world.fx.screen_shake
            } else {
                0.0
            },
            flash: if settings.effective_flash() {
                world.fx.flash
            } else {
                0
            },
            slow_motion: world.fx.slow_motion,
            heat: world.weapon.heat,
            max_heat: MAX_HEAT,
            overheated: world.weapon.overheated,
            ak47_active: world.effects.ak47.active,
            pentagram_active: world.effects.pentagram.active,
            homing_active: world.effects.homing.active,
            speed_active: world.effects.speed.active,
            effect_timers: EffectTimers {
                ak47_secs: secs_remaining(world.effects.ak47.timer),
                pentagram_secs: secs_remaining(world.effects.pentagram.timer),
                homing_secs: secs_remaining(world.effects.homing.timer),
                speed_secs: secs_remaining(world.effects.speed.timer),
            },
        }
    }
}

/// Consumes frames; must never feed anything back into the simulation.
pub trait RenderSink {
    fn present(&mut self, frame: &RenderFrame);
}

/// Sink that discards every frame (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullRenderSink;

impl RenderSink for NullRenderSink {
    fn present(&mut self, _frame: &RenderFrame) {}
}
