//! Shooting state machine: per-shot cooldown plus a heat gauge
//!
//! Two independent rate limiters. The cooldown spaces individual shots;
//! the heat gauge punishes sustained fire: at maximum heat the weapon
//! locks until it has drained all the way back to zero.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::InputState;

use super::state::{Projectile, World};

/// Cooldown and heat state
///
/// The cooldown is fractional: the ak47 modifier halves the 15-tick
/// delay to 7.5, and the gauge ticks down by whole units, so the
/// effective delay alternates around the fraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponState {
    pub cooldown: f32,
    pub heat: f32,
    pub overheated: bool,
}

/// Advance the weapon timers, then fire for every held shoot direction.
///
/// Held directions are tried in a fixed order; the cooldown set by the
/// first successful shot blocks the rest, so one shot per tick at most.
pub fn update_weapon(world: &mut World, input: &InputState) {
    if world.weapon.cooldown > 0.0 {
        world.weapon.cooldown -= 1.0;
    }

    if world.weapon.heat > 0.0 {
        world.weapon.heat = (world.weapon.heat - HEAT_DECAY).max(0.0);
    }
    if world.weapon.overheated && world.weapon.heat <= 0.0 {
        world.weapon.overheated = false;
    }

    for dir in input.shoot_directions() {
        shoot(world, dir);
    }
}

/// Fire one projectile in `dir` if the weapon allows it.
///
/// A zero-length direction is a silent no-op.
pub fn shoot(world: &mut World, dir: Vec2) {
    if world.weapon.cooldown > 0.0 || world.weapon.overheated {
        return;
    }
    let length = dir.length();
    if length == 0.0 {
        return;
    }

    let ak47 = world.effects.ak47.active;
    let pentagram = world.effects.pentagram.active;

    let speed = if ak47 {
        PROJECTILE_SPEED * AK47_SPEED_FACTOR
    } else {
        PROJECTILE_SPEED
    };
    let damage = if ak47 { AK47_DAMAGE } else { 1 }
        * if pentagram { PENTAGRAM_DAMAGE_FACTOR } else { 1 };

    world.projectiles.push(Projectile {
        pos: world.player.pos,
        vel: dir / length * speed,
        damage,
        is_ak47: ak47,
        is_homing: world.effects.homing.active,
    });

    world.weapon.cooldown = if ak47 {
        SHOT_COOLDOWN_TICKS * AK47_COOLDOWN_FACTOR
    } else {
        SHOT_COOLDOWN_TICKS
    };

    let heat_per_shot = if ak47 {
        HEAT_PER_SHOT * AK47_HEAT_FACTOR
    } else {
        HEAT_PER_SHOT
    };
    world.weapon.heat += heat_per_shot;
    if world.weapon.heat >= MAX_HEAT {
        world.weapon.heat = MAX_HEAT;
        world.weapon.overheated = true;
    }
}
