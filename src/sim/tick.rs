//! Fixed-timestep simulation tick
//!
//! One call advances every subsystem in a fixed order: player,
//! projectiles, enemies, coins, powerups/combo/shake, then cosmetics.
//! The order is a contract, not an accident - collision checks run
//! against positions already advanced this tick. All transitions
//! complete synchronously; nothing here blocks or yields.
//!
//! `now_ms` is the host's wall clock, used only for the combo window
//! (the one deliberately wall-clock mechanic); every other timer counts
//! ticks.

use glam::Vec2;

use crate::input::InputState;

use super::state::{RunPhase, World};
use super::{combat, combo, enemy, powerups, spawn, weapon};

/// Advance the world by one tick.
///
/// A no-op unless the run is active. A lethal hit mid-tick lets the
/// tick finish and leaves the world in [`RunPhase::GameOver`] so no
/// further ticks run.
pub fn tick(world: &mut World, input: &InputState, now_ms: f64) {
    if world.phase != RunPhase::Running {
        return;
    }
    world.tick_count += 1;

    // Player movement and the invulnerability countdown.
    let movement = input.movement();
    world.player.is_moving = movement != Vec2::ZERO;
    let step = movement * world.player.speed;
    world.player.pos += step;
    world.clamp_player();
    world.player.tick_invulnerability();

    // Weapon timers, firing, and projectile flight.
    weapon::update_weapon(world, input);
    combat::advance_player_projectiles(world);
    combat::advance_enemy_projectiles(world);

    // Enemies: spawning, AI, then the collision passes against the
    // freshly moved positions.
    spawn::update_spawner(world);
    enemy::update_enemies(world);
    combat::resolve_enemy_contacts(world);
    combat::resolve_projectile_hits(world, now_ms);

    // Coins on the ground.
    combat::update_helmets(world);

    // Timed effects, combo lapse, feedback decay, pickups.
    powerups::tick_effects(world);
    combo::tick_combo(world);
    world.fx.update_timers();
    powerups::collect_powerups(world);

    // Cosmetics.
    world.fx.update_particles();
    world.fx.update_hitmarkers();
    world.fx.update_popups();
}
