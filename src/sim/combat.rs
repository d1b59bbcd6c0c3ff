//! Collision resolution and its side-effect chains
//!
//! Every check is a circle-circle distance test, once per pair per
//! tick, after movement has already run. No spatial partitioning; the
//! entity counts stay far below where O(n*m) would matter.
//!
//! Removal is never done mid-iteration: hits mark state (health,
//! used-projectile flags) and a single retain pass per collection
//! applies the deaths afterwards.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::{direction_between, distance, normalize_angle};

use super::combo;
use super::fx::palette;
use super::state::{EnemyKind, GameEvent, Helmet, Powerup, PowerupKind, RunPhase, World};

/// Steer homing shots, advance all player projectiles, cull the
/// out-of-bounds.
pub fn advance_player_projectiles(world: &mut World) {
    let World {
        projectiles,
        enemies,
        ..
    } = world;

    for proj in projectiles.iter_mut() {
        if proj.is_homing && !enemies.is_empty() {
            // Nearest living enemy by linear scan.
            let nearest = enemies
                .iter()
                .min_by(|a, b| {
                    let da = (a.pos - proj.pos).length_squared();
                    let db = (b.pos - proj.pos).length_squared();
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|e| e.pos);

            if let Some(target) = nearest {
                // Coincident target: no bearing exists, keep heading.
                if direction_between(proj.pos, target).is_some() {
                    let bearing = (target.y - proj.pos.y).atan2(target.x - proj.pos.x);
                    let heading = proj.vel.y.atan2(proj.vel.x);
                    let delta = normalize_angle(bearing - heading);
                    let new_heading = heading + delta * HOMING_TURN_FRACTION;
                    let speed = proj.vel.length();
                    proj.vel = Vec2::new(new_heading.cos(), new_heading.sin()) * speed;
                }
            }
        }

        proj.pos += proj.vel;
    }

    let width = world.width;
    let height = world.height;
    world.projectiles.retain(|p| {
        p.pos.x >= -OFFSCREEN_MARGIN
            && p.pos.x <= width + OFFSCREEN_MARGIN
            && p.pos.y >= -OFFSCREEN_MARGIN
            && p.pos.y <= height + OFFSCREEN_MARGIN
    });
}

/// Advance enemy projectiles: range fade, player hits, bounds expiry.
pub fn advance_enemy_projectiles(world: &mut World) {
    let mut projectiles = std::mem::take(&mut world.enemy_projectiles);

    projectiles.retain_mut(|proj| {
        proj.pos += proj.vel;

        // Fly shots expire by distance and telegraph it by shrinking.
        if let Some(range) = &mut proj.range {
            range.traveled += proj.vel.length();
            let life_ratio = (1.0 - range.traveled / range.max_distance).max(0.0);
            proj.radius = (proj.base_radius * life_ratio).max(2.0);
            if range.traveled >= range.max_distance {
                return false;
            }
        }

        if distance(proj.pos, world.player.pos) < world.player.radius
            && !world.player.invulnerable
        {
            damage_player(world);
            let pos = world.player.pos;
            let World { fx, rng, .. } = world;
            fx.spawn_hit_particles(rng, pos, palette::ORANGE);
            fx.set_shake(6.0);
            return false;
        }

        world.in_bounds(proj.pos)
    });

    world.enemy_projectiles = projectiles;
}

/// Contact damage from overlapping enemies; the enemy survives.
pub fn resolve_enemy_contacts(world: &mut World) {
    for i in 0..world.enemies.len() {
        let enemy_pos = world.enemies[i].pos;
        let enemy_radius = world.enemies[i].radius;
        if distance(enemy_pos, world.player.pos) < world.player.radius + enemy_radius
            && !world.player.invulnerable
        {
            damage_player(world);
        }
    }
}

/// Player projectiles against enemies, with full kill resolution.
pub fn resolve_projectile_hits(world: &mut World, now_ms: f64) {
    let mut proj_used = vec![false; world.projectiles.len()];

    for e_idx in 0..world.enemies.len() {
        for p_idx in 0..world.projectiles.len() {
            if proj_used[p_idx] {
                continue;
            }
            let enemy_pos = world.enemies[e_idx].pos;
            let enemy_radius = world.enemies[e_idx].radius;
            let proj_pos = world.projectiles[p_idx].pos;

            if distance(proj_pos, enemy_pos) >= enemy_radius + PROJECTILE_HIT_RADIUS {
                continue;
            }

            proj_used[p_idx] = true;
            let damage = world.projectiles[p_idx].damage;
            world.enemies[e_idx].health -= damage;
            world.enemies[e_idx].hit_flash = HIT_FLASH_TICKS;
            {
                let World { fx, rng, .. } = world;
                fx.spawn_hit_particles(rng, enemy_pos, palette::WHITE);
                fx.set_shake(2.0);
            }

            if world.enemies[e_idx].health <= 0 {
                resolve_kill(world, e_idx, now_ms);
                break;
            } else {
                world.fx.spawn_hitmarker(enemy_pos, false);
            }
        }
    }

    let mut used = proj_used.into_iter();
    world.projectiles.retain(|_| !used.next().unwrap_or(false));
    world.enemies.retain(|e| e.health > 0);
}

/// Rewards and drops for the enemy at `e_idx`, which has just died.
/// The corpse is removed by the caller's retain pass in the same tick.
fn resolve_kill(world: &mut World, e_idx: usize, now_ms: f64) {
    let pos = world.enemies[e_idx].pos;
    let kind = world.enemies[e_idx].kind.clone();

    {
        let World { fx, rng, .. } = world;
        fx.spawn_hit_particles(rng, pos, palette::FLY);
        fx.spawn_hit_particles(rng, pos, palette::WHITE);
        fx.spawn_hitmarker(pos, true);
    }

    world.record_kill();
    combo::register_kill(world, pos, now_ms);

    match kind {
        EnemyKind::Speeder => {
            let roll: f32 = world.rng.random();
            let powerup_kind = if roll < 0.33 {
                PowerupKind::Ak47
            } else if roll < 0.66 {
                PowerupKind::Pentagram
            } else {
                PowerupKind::Speed
            };
            let text = if powerup_kind == PowerupKind::Speed {
                "SPEED BOOST!"
            } else {
                "POWERUP!"
            };
            world.powerups.push(Powerup {
                pos,
                kind: powerup_kind,
            });
            world
                .fx
                .spawn_popup(pos + Vec2::new(0.0, 20.0), text, palette::GREEN, 18.0);
        }
        EnemyKind::Shooter { .. } => {
            world.powerups.push(Powerup {
                pos,
                kind: PowerupKind::Homing,
            });
            world
                .fx
                .spawn_popup(pos + Vec2::new(0.0, 20.0), "HOMING!", palette::GREEN, 18.0);
        }
        EnemyKind::Fly { .. } => {
            let count = world.combo.multiplier.floor() as u32;
            for _ in 0..count {
                let scatter = Vec2::new(
                    (world.rng.random::<f32>() - 0.5) * COIN_SCATTER,
                    (world.rng.random::<f32>() - 0.5) * COIN_SCATTER,
                );
                world.helmets.push(Helmet {
                    pos: pos + scatter,
                    size: HELMET_SIZE,
                    life: HELMET_LIFE_TICKS,
                });
            }
            if world.combo.multiplier > 1.0 {
                world
                    .fx
                    .spawn_popup(pos, &format!("x{count} COINS!"), palette::GOLD, 16.0);
            }
        }
    }
}

/// Age coins out and collect the ones in reach.
pub fn update_helmets(world: &mut World) {
    let player_pos = world.player.pos;
    let player_radius = world.player.radius;
    let mut collected = 0u32;

    world.helmets.retain_mut(|helmet| {
        helmet.life = helmet.life.saturating_sub(1);
        if helmet.life == 0 {
            return false;
        }
        if distance(player_pos, helmet.pos) < player_radius + helmet.size / 2.0 {
            collected += 1;
            return false;
        }
        true
    });

    for _ in 0..collected {
        world.add_coins(1);
    }
}

/// Apply one point of damage to the player and engage invulnerability.
///
/// Health is clamped at zero; reaching it ends the run in the same
/// tick, exactly once.
pub fn damage_player(world: &mut World) {
    world.player.health = (world.player.health - 1).max(0);
    world.player.invulnerable = true;
    world.player.invulnerable_ticks = INVULNERABILITY_TICKS;
    world.events.push(GameEvent::HealthChanged {
        health: world.player.health,
        max: world.player.max_health,
    });

    if world.player.health <= 0 && world.phase == RunPhase::Running {
        world.phase = RunPhase::GameOver;
        world.events.push(GameEvent::GameOver(world.stats()));
        log::info!(
            "game over: {} kills, {} coins",
            world.kills,
            world.coins
        );
    }
}
