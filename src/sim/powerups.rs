//! Powerup effect registry
//!
//! Four independent timed slots. Pickup arms a slot for ten seconds;
//! expiry is a per-tick countdown. Slots never interact except where a
//! modifier stacks explicitly (ak47 x pentagram damage).

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::distance;

use super::fx::palette;
use super::state::{PowerupKind, World};

/// One timed effect slot. Invariant: `timer > 0` implies `active`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EffectSlot {
    pub active: bool,
    pub timer: u32,
}

impl EffectSlot {
    fn arm(&mut self) {
        self.active = true;
        self.timer = POWERUP_DURATION_TICKS;
    }

    /// Count down; returns true on the tick the slot expires.
    fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.timer = self.timer.saturating_sub(1);
        if self.timer == 0 {
            self.active = false;
            return true;
        }
        false
    }
}

/// All effect slots
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PowerupEffects {
    pub ak47: EffectSlot,
    pub pentagram: EffectSlot,
    pub homing: EffectSlot,
    pub speed: EffectSlot,
}

/// Count down every active slot and revert expired stat modifications.
pub fn tick_effects(world: &mut World) {
    world.effects.ak47.tick();
    world.effects.pentagram.tick();
    world.effects.homing.tick();
    if world.effects.speed.tick() {
        // Restored explicitly, not derived: other code may have left
        // the speed modified.
        world.player.speed = world.base_player_speed;
    }
}

/// Collect any powerup within pickup range and apply its effect.
pub fn collect_powerups(world: &mut World) {
    let player_pos = world.player.pos;
    let reach = world.player.radius + POWERUP_PICKUP_RADIUS;

    let mut collected = Vec::new();
    world.powerups.retain(|powerup| {
        if distance(player_pos, powerup.pos) < reach {
            collected.push(powerup.clone());
            false
        } else {
            true
        }
    });

    for powerup in collected {
        apply_pickup(world, powerup.kind, powerup.pos);
    }
}

fn apply_pickup(world: &mut World, kind: PowerupKind, pos: glam::Vec2) {
    let World {
        effects,
        fx,
        rng,
        player,
        base_player_speed,
        ..
    } = world;
    match kind {
        PowerupKind::Ak47 => {
            effects.ak47.arm();
            fx.spawn_hit_particles(rng, pos, palette::GOLD);
            fx.spawn_popup(pos, "AK-47!", palette::GOLD, 25.0);
            fx.set_shake(10.0);
            fx.set_flash(15);
        }
        PowerupKind::Pentagram => {
            effects.pentagram.arm();
            fx.spawn_hit_particles(rng, pos, palette::RED);
            fx.spawn_popup(pos, "PENTAGRAM!", palette::RED, 25.0);
            fx.set_shake(10.0);
            fx.set_flash(15);
        }
        PowerupKind::Homing => {
            effects.homing.arm();
            fx.spawn_hit_particles(rng, pos, palette::GREEN);
            fx.spawn_popup(pos, "HOMING!", palette::GREEN, 25.0);
            fx.set_shake(10.0);
            fx.set_flash(15);
        }
        PowerupKind::Speed => {
            effects.speed.arm();
            player.speed = *base_player_speed * SPEED_BOOST_FACTOR;
            fx.spawn_hit_particles(rng, pos, palette::GOLD);
            fx.spawn_popup(pos, "SPEED!", palette::GOLD, 25.0);
            fx.set_shake(6.0);
        }
    }
}
