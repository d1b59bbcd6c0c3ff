//! Spawn scheduling and difficulty ramp
//!
//! Enemies enter from just outside one of the four screen edges on a
//! timer whose interval shortens over the run. The ramp only resets
//! with the rest of the world state.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

use super::enemy;
use super::state::{Enemy, World};

/// Spawn timer and difficulty ramp state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnState {
    pub timer: u32,
    /// Ticks between spawns; ramps down to [`MIN_SPAWN_RATE`]
    pub rate: u32,
    pub difficulty_timer: u32,
}

impl Default for SpawnState {
    fn default() -> Self {
        Self {
            timer: 0,
            rate: BASE_SPAWN_RATE,
            difficulty_timer: 0,
        }
    }
}

/// Advance the ramp and spawn timers, emitting at most one enemy.
pub fn update_spawner(world: &mut World) {
    world.spawn.difficulty_timer += 1;
    if world.spawn.difficulty_timer >= SPAWN_RAMP_INTERVAL {
        world.spawn.difficulty_timer = 0;
        if world.spawn.rate > MIN_SPAWN_RATE {
            world.spawn.rate = world.spawn.rate.saturating_sub(SPAWN_RAMP_STEP).max(MIN_SPAWN_RATE);
            log::debug!("spawn interval ramped to {} ticks", world.spawn.rate);
        }
    }

    world.spawn.timer += 1;
    if world.spawn.timer >= world.spawn.rate {
        world.spawn.timer = 0;
        let enemy = roll_enemy(world);
        world.enemies.push(enemy);
    }
}

/// Pick an edge position and a weighted variant for one spawn.
fn roll_enemy(world: &mut World) -> Enemy {
    let pos = edge_position(world);

    let roll: f32 = world.rng.random();
    if roll < 0.05 {
        enemy::spawn_shooter(pos)
    } else if roll < 0.15 {
        enemy::spawn_speeder(&mut world.rng, pos)
    } else {
        enemy::spawn_fly(&mut world.rng, pos)
    }
}

/// Uniform edge choice, uniform position along it, offset outside the
/// visible bounds.
fn edge_position(world: &mut World) -> Vec2 {
    let (w, h) = (world.width, world.height);
    match world.rng.random_range(0..4u8) {
        0 => Vec2::new(world.rng.random::<f32>() * w, -SPAWN_EDGE_OFFSET),
        1 => Vec2::new(w + SPAWN_EDGE_OFFSET, world.rng.random::<f32>() * h),
        2 => Vec2::new(world.rng.random::<f32>() * w, h + SPAWN_EDGE_OFFSET),
        _ => Vec2::new(-SPAWN_EDGE_OFFSET, world.rng.random::<f32>() * h),
    }
}
