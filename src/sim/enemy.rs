//! Enemy factories and per-variant AI
//!
//! Three variants share the [`Enemy`] record and differ in movement and
//! attack behavior, dispatched over [`EnemyKind`]. Behavior is
//! re-evaluated every tick; there is no suspended state.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::direction_between;

use super::fx::palette;
use super::state::{Enemy, EnemyKind, EnemyProjectile, TravelRange, World};

/// The common fly: steady chase plus a randomized ranged shot.
pub fn spawn_fly(rng: &mut Pcg32, pos: Vec2) -> Enemy {
    Enemy {
        pos,
        radius: FLY_RADIUS,
        speed: 1.0 + rng.random::<f32>() * 0.5,
        health: FLY_HEALTH,
        color: palette::FLY,
        hit_flash: 0,
        kind: EnemyKind::Fly {
            shoot_timer: rng.random_range(0..60),
            shoot_cooldown: fly_cooldown(rng),
        },
    }
}

/// Fast melee chaser.
pub fn spawn_speeder(rng: &mut Pcg32, pos: Vec2) -> Enemy {
    Enemy {
        pos,
        radius: SPEEDER_RADIUS,
        speed: 2.5 + rng.random::<f32>(),
        health: SPEEDER_HEALTH,
        color: palette::SPEEDER,
        hit_flash: 0,
        kind: EnemyKind::Speeder,
    }
}

/// Slow burst-fire enemy that keeps its distance.
pub fn spawn_shooter(pos: Vec2) -> Enemy {
    Enemy {
        pos,
        radius: SHOOTER_RADIUS,
        speed: SHOOTER_SPEED,
        health: SHOOTER_HEALTH,
        color: palette::SHOOTER,
        hit_flash: 0,
        kind: EnemyKind::Shooter {
            shoot_timer: 0,
            burst_shots_remaining: 0,
            burst_delay: 0,
        },
    }
}

fn fly_cooldown(rng: &mut Pcg32) -> u32 {
    120 + rng.random_range(0..60)
}

/// Advance movement and attack state for every enemy.
///
/// Runs before the collision passes, so collisions this tick see
/// already-moved positions.
pub fn update_enemies(world: &mut World) {
    let World {
        enemies,
        enemy_projectiles,
        fx,
        rng,
        player,
        ..
    } = world;

    for enemy in enemies.iter_mut() {
        // Direction to the player, fixed at the start of the enemy's
        // turn; both movement and aim use it. None when coincident.
        let to_player = direction_between(enemy.pos, player.pos);
        let dist = (player.pos - enemy.pos).length();

        match &mut enemy.kind {
            EnemyKind::Fly {
                shoot_timer,
                shoot_cooldown,
            } => {
                if let Some(dir) = to_player {
                    enemy.pos += dir * enemy.speed;
                }

                *shoot_timer += 1;
                if *shoot_timer >= *shoot_cooldown {
                    *shoot_timer = 0;
                    *shoot_cooldown = fly_cooldown(rng);

                    if let Some(dir) = to_player {
                        enemy_projectiles.push(EnemyProjectile {
                            pos: enemy.pos,
                            vel: dir * FLY_PROJECTILE_SPEED,
                            damage: 1,
                            radius: ENEMY_PROJECTILE_RADIUS,
                            base_radius: ENEMY_PROJECTILE_RADIUS,
                            color: palette::FLY,
                            range: Some(TravelRange {
                                max_distance: FLY_PROJECTILE_RANGE,
                                traveled: 0.0,
                            }),
                        });
                        fx.spawn_hit_particles(rng, enemy.pos, palette::FLY);
                    }
                }
            }

            EnemyKind::Speeder => {
                if let Some(dir) = to_player {
                    enemy.pos += dir * enemy.speed;
                }
            }

            EnemyKind::Shooter {
                shoot_timer,
                burst_shots_remaining,
                burst_delay,
            } => {
                *shoot_timer += 1;

                if *burst_shots_remaining > 0 {
                    if *burst_delay > 0 {
                        *burst_delay -= 1;
                    }
                    if *burst_delay == 0 {
                        // Each burst shot aims at the player's position
                        // at fire time, not predictively.
                        if let Some(dir) = direction_between(enemy.pos, player.pos) {
                            enemy_projectiles.push(EnemyProjectile {
                                pos: enemy.pos,
                                vel: dir * SHOOTER_PROJECTILE_SPEED,
                                damage: 1,
                                radius: ENEMY_PROJECTILE_RADIUS,
                                base_radius: ENEMY_PROJECTILE_RADIUS,
                                color: palette::SHOOTER,
                                range: None,
                            });
                            fx.spawn_hit_particles(rng, enemy.pos, palette::SHOOTER);
                        }
                        *burst_shots_remaining -= 1;
                        *burst_delay = BURST_SPACING_TICKS;
                    }
                } else if *shoot_timer >= SHOOTER_COOLDOWN_TICKS {
                    *shoot_timer = 0;
                    *burst_shots_remaining = BURST_COUNT;
                    *burst_delay = 0;
                }

                // Hold the engagement band: retreat when crowded,
                // advance when out of range, otherwise stand.
                if let Some(dir) = to_player {
                    if dist < SHOOTER_NEAR_BAND {
                        enemy.pos -= dir * enemy.speed;
                    } else if dist > SHOOTER_FAR_BAND {
                        enemy.pos += dir * enemy.speed;
                    }
                }
            }
        }

        if enemy.hit_flash > 0 {
            enemy.hit_flash -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn world_with_enemy(enemy: Enemy) -> World {
        let mut world = World::new(42);
        world.enemies.push(enemy);
        world
    }

    #[test]
    fn test_fly_stat_rolls_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..50 {
            let fly = spawn_fly(&mut rng, Vec2::ZERO);
            assert_eq!(fly.radius, FLY_RADIUS);
            assert_eq!(fly.health, FLY_HEALTH);
            assert!(fly.speed >= 1.0 && fly.speed < 1.5);
            match fly.kind {
                EnemyKind::Fly {
                    shoot_timer,
                    shoot_cooldown,
                } => {
                    assert!(shoot_timer < 60);
                    assert!((120..180).contains(&shoot_cooldown));
                }
                _ => panic!("wrong kind"),
            }
        }
    }

    #[test]
    fn test_speeder_stat_rolls_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..50 {
            let speeder = spawn_speeder(&mut rng, Vec2::ZERO);
            assert!(speeder.speed >= 2.5 && speeder.speed < 3.5);
            assert_eq!(speeder.health, SPEEDER_HEALTH);
        }
    }

    #[test]
    fn test_fly_chases_player() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut fly = spawn_fly(&mut rng, Vec2::new(0.0, 250.0));
        fly.kind = EnemyKind::Fly {
            shoot_timer: 0,
            shoot_cooldown: 10_000,
        };
        let mut world = world_with_enemy(fly);

        let before = (world.player.pos - world.enemies[0].pos).length();
        update_enemies(&mut world);
        let after = (world.player.pos - world.enemies[0].pos).length();
        assert!(after < before);
    }

    #[test]
    fn test_enemy_on_player_is_noop() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut world = World::new(42);
        let pos = world.player.pos;
        world.enemies.push(spawn_speeder(&mut rng, pos));

        update_enemies(&mut world);
        // Coincident positions produce no movement and no panic.
        assert_eq!(world.enemies[0].pos, pos);
    }

    #[test]
    fn test_shooter_retreats_inside_band() {
        let mut world = World::new(42);
        let pos = world.player.pos + Vec2::new(100.0, 0.0);
        world.enemies.push(spawn_shooter(pos));

        update_enemies(&mut world);
        let dist = (world.player.pos - world.enemies[0].pos).length();
        assert!(dist > 100.0);
    }

    #[test]
    fn test_shooter_advances_outside_band() {
        let mut world = World::new(42);
        let pos = world.player.pos + Vec2::new(300.0, 0.0);
        world.enemies.push(spawn_shooter(pos));

        update_enemies(&mut world);
        let dist = (world.player.pos - world.enemies[0].pos).length();
        assert!(dist < 300.0);
    }

    #[test]
    fn test_shooter_holds_position_in_band() {
        let mut world = World::new(42);
        let pos = world.player.pos + Vec2::new(200.0, 0.0);
        world.enemies.push(spawn_shooter(pos));

        update_enemies(&mut world);
        assert_eq!(world.enemies[0].pos, pos);
    }

    #[test]
    fn test_shooter_burst_emits_three_spaced_shots() {
        let mut world = World::new(42);
        let pos = world.player.pos + Vec2::new(200.0, 0.0);
        world.enemies.push(spawn_shooter(pos));

        let mut shot_ticks = Vec::new();
        for t in 0..SHOOTER_COOLDOWN_TICKS + 40 {
            let before = world.enemy_projectiles.len();
            update_enemies(&mut world);
            if world.enemy_projectiles.len() > before {
                shot_ticks.push(t);
            }
        }

        assert_eq!(shot_ticks.len() as u32, BURST_COUNT);
        assert_eq!(shot_ticks[1] - shot_ticks[0], BURST_SPACING_TICKS);
        assert_eq!(shot_ticks[2] - shot_ticks[1], BURST_SPACING_TICKS);
    }

    #[test]
    fn test_fly_shot_has_travel_range() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut fly = spawn_fly(&mut rng, Vec2::new(0.0, 0.0));
        fly.kind = EnemyKind::Fly {
            shoot_timer: 119,
            shoot_cooldown: 120,
        };
        let mut world = world_with_enemy(fly);

        update_enemies(&mut world);
        assert_eq!(world.enemy_projectiles.len(), 1);
        let range = world.enemy_projectiles[0].range.expect("fly shot has range");
        assert_eq!(range.max_distance, FLY_PROJECTILE_RANGE);
    }
}
