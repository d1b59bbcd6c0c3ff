//! Cosmetic feedback: particles, hitmarkers, text popups, and the
//! screen shake / flash / slow-motion timers
//!
//! Nothing here affects gameplay; the render sink reads it all out of
//! [`FxState`] through the frame snapshot. Shake is exposed as a plain
//! intensity value - the sink owns whatever visual transform it maps to.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// RGB colors shared by entities and feedback effects
pub mod palette {
    pub const PLAYER: u32 = 0x667EEA;
    pub const FLY: u32 = 0xE74C3C;
    pub const SPEEDER: u32 = 0x2ECC71;
    pub const SHOOTER: u32 = 0x9B59B6;
    pub const WHITE: u32 = 0xFFFFFF;
    pub const GOLD: u32 = 0xFFD700;
    pub const GREEN: u32 = 0x00FF00;
    pub const RED: u32 = 0xFF0000;
    pub const ORANGE: u32 = 0xFF6B35;
}

/// Praise lines for high combos, drawn at random
pub const PRAISE_TEXTS: [&str; 8] = [
    "BRUTAL!",
    "SAVAGE!",
    "INSANE!",
    "LEGENDARY!",
    "UNSTOPPABLE!",
    "GODLIKE!",
    "RAMPAGE!",
    "ULTRA KILL!",
];

/// Cap on live particles; the oldest are evicted past it
pub const MAX_PARTICLES: usize = 256;

/// A burst particle fading over its lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
    pub color: u32,
}

/// An X-shaped hit confirmation marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hitmarker {
    pub pos: Vec2,
    pub life: u32,
    pub max_life: u32,
    pub is_kill: bool,
}

/// Floating reward/announcement text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPopup {
    pub pos: Vec2,
    pub text: String,
    pub color: u32,
    pub size: f32,
    pub life: u32,
    pub max_life: u32,
    pub vy: f32,
}

/// All cosmetic state for a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FxState {
    pub particles: Vec<Particle>,
    pub hitmarkers: Vec<Hitmarker>,
    pub popups: Vec<TextPopup>,
    /// Shake intensity in display units; decays toward zero
    pub screen_shake: f32,
    /// Remaining ticks of the full-screen flash
    pub flash: u32,
    /// Remaining ticks of the slow-motion overlay
    pub slow_motion: u32,
}

impl FxState {
    /// Eight-way ring of colored particles at an impact point
    pub fn spawn_hit_particles(&mut self, rng: &mut Pcg32, pos: Vec2, color: u32) {
        for i in 0..8 {
            let angle = std::f32::consts::TAU * i as f32 / 8.0;
            let speed = 2.0 + rng.random::<f32>() * 3.0;
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 30,
                max_life: 30,
                size: 3.0 + rng.random::<f32>() * 3.0,
                color,
            });
        }
    }

    pub fn spawn_hitmarker(&mut self, pos: Vec2, is_kill: bool) {
        self.hitmarkers.push(Hitmarker {
            pos,
            life: HITMARKER_LIFE_TICKS,
            max_life: HITMARKER_LIFE_TICKS,
            is_kill,
        });
    }

    pub fn spawn_popup(&mut self, pos: Vec2, text: &str, color: u32, size: f32) {
        self.popups.push(TextPopup {
            pos,
            text: text.to_string(),
            color,
            size,
            life: POPUP_LIFE_TICKS,
            max_life: POPUP_LIFE_TICKS,
            vy: -2.0,
        });
    }

    /// Raise shake to at least `intensity`; never lowers an ongoing shake
    pub fn set_shake(&mut self, intensity: f32) {
        self.screen_shake = self.screen_shake.max(intensity);
    }

    pub fn set_flash(&mut self, ticks: u32) {
        self.flash = self.flash.max(ticks);
    }

    pub fn set_slow_motion(&mut self, ticks: u32) {
        self.slow_motion = self.slow_motion.max(ticks);
    }

    /// Advance particle motion and cull the expired
    pub fn update_particles(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel *= PARTICLE_DRAG;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn update_hitmarkers(&mut self) {
        for marker in &mut self.hitmarkers {
            marker.life = marker.life.saturating_sub(1);
        }
        self.hitmarkers.retain(|m| m.life > 0);
    }

    pub fn update_popups(&mut self) {
        for popup in &mut self.popups {
            popup.pos.y += popup.vy;
            popup.vy *= 0.95;
            popup.life = popup.life.saturating_sub(1);
        }
        self.popups.retain(|p| p.life > 0);
    }

    /// Decay the shake/flash/slow-motion timers one tick
    pub fn update_timers(&mut self) {
        self.screen_shake *= SHAKE_DECAY;
        if self.screen_shake < 0.1 {
            self.screen_shake = 0.0;
        }
        self.flash = self.flash.saturating_sub(1);
        self.slow_motion = self.slow_motion.saturating_sub(1);
    }

    /// Rescale stored positions for a viewport change
    pub fn rescale(&mut self, scale: Vec2) {
        for particle in &mut self.particles {
            particle.pos *= scale;
        }
        for marker in &mut self.hitmarkers {
            marker.pos *= scale;
        }
        for popup in &mut self.popups {
            popup.pos *= scale;
        }
    }
}
