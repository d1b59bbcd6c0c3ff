//! Combo window, multiplier, and kill-streak rewards
//!
//! The combo window is the one piece of wall-clock timing in the sim:
//! kills chain while they land within two real seconds of each other.
//! The host supplies the timestamp, so replays and tests stay in
//! control of it. The on-screen combo timer counts ticks like
//! everything else.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

use super::fx::{PRAISE_TEXTS, palette};
use super::state::World;

/// Streak and combo counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboState {
    pub count: u32,
    /// Ticks until the combo lapses
    pub timer: u32,
    /// Derived: 1 + count * 0.1
    pub multiplier: f32,
    /// Monotonic across combo resets; only a full reset clears it
    pub kill_streak: u32,
    /// Wall-clock timestamp of the previous kill, if any (milliseconds)
    pub last_kill_ms: Option<f64>,
}

impl Default for ComboState {
    fn default() -> Self {
        Self {
            count: 0,
            timer: 0,
            multiplier: 1.0,
            kill_streak: 0,
            last_kill_ms: None,
        }
    }
}

/// Update combo and streak state for a kill at `pos`.
///
/// Callers read `world.combo.multiplier` afterwards for reward scaling;
/// the chained kill is already included in it.
pub fn register_kill(world: &mut World, pos: Vec2, now_ms: f64) {
    // The first kill of a run never chains, whatever the host clock
    // happens to read.
    let chained = world
        .combo
        .last_kill_ms
        .is_some_and(|last| now_ms - last < COMBO_WINDOW_MS);
    if chained {
        world.combo.count += 1;
        world.combo.timer = COMBO_TIMER_TICKS;
        world.combo.multiplier = 1.0 + world.combo.count as f32 * COMBO_MULTIPLIER_STEP;

        if world.combo.count >= 10 {
            world.fx.set_shake(8.0);
            world.fx.set_flash(10);
            world.fx.set_slow_motion(30);
        } else if world.combo.count >= 5 {
            world.fx.set_shake(5.0);
            world.fx.set_flash(5);
        }

        if world.combo.count >= 5 {
            let praise = PRAISE_TEXTS[world.rng.random_range(0..PRAISE_TEXTS.len())];
            world
                .fx
                .spawn_popup(pos - Vec2::new(0.0, 30.0), praise, palette::GOLD, 25.0);
        }
    } else {
        world.combo.count = 1;
        world.combo.timer = COMBO_TIMER_TICKS;
        world.combo.multiplier = 1.0;
    }
    world.combo.last_kill_ms = Some(now_ms);

    // The streak never lapses; every fifth kill pays out.
    world.combo.kill_streak += 1;
    if world.combo.kill_streak % STREAK_BONUS_INTERVAL == 0 {
        let bonus = world.combo.kill_streak / STREAK_BONUS_INTERVAL;
        world.add_coins(bonus);
        world
            .fx
            .spawn_popup(pos, &format!("+{bonus} BONUS!"), palette::GOLD, 20.0);
    }
}

/// Count the combo timer down; announce and reset a lapsed combo.
pub fn tick_combo(world: &mut World) {
    if world.combo.timer == 0 {
        return;
    }
    world.combo.timer -= 1;
    if world.combo.timer == 0 {
        if world.combo.count > COMBO_LOST_THRESHOLD {
            let center = Vec2::new(world.width / 2.0, world.height / 2.0);
            world
                .fx
                .spawn_popup(center, "COMBO LOST!", palette::RED, 30.0);
            world.combo.count = 1;
        } else {
            world.combo.count = 0;
        }
        world.combo.multiplier = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kills_inside_window_chain() {
        let mut world = World::new(11);
        register_kill(&mut world, Vec2::ZERO, 10_000.0);
        assert_eq!(world.combo.count, 1);
        register_kill(&mut world, Vec2::ZERO, 11_000.0);
        assert_eq!(world.combo.count, 2);
        assert!((world.combo.multiplier - 1.2).abs() < 1e-5);
        register_kill(&mut world, Vec2::ZERO, 12_500.0);
        assert_eq!(world.combo.count, 3);
    }

    #[test]
    fn test_gap_resets_combo_to_one() {
        let mut world = World::new(11);
        register_kill(&mut world, Vec2::ZERO, 10_000.0);
        register_kill(&mut world, Vec2::ZERO, 11_000.0);
        register_kill(&mut world, Vec2::ZERO, 14_000.0);
        assert_eq!(world.combo.count, 1);
        assert_eq!(world.combo.multiplier, 1.0);
    }

    #[test]
    fn test_streak_survives_combo_reset() {
        let mut world = World::new(11);
        for i in 0..4 {
            // 3-second gaps: every combo resets, the streak keeps going.
            register_kill(&mut world, Vec2::ZERO, 10_000.0 + i as f64 * 3000.0);
        }
        assert_eq!(world.combo.kill_streak, 4);
        assert_eq!(world.combo.count, 1);
    }

    #[test]
    fn test_every_fifth_kill_pays_bonus() {
        let mut world = World::new(11);
        for i in 0..10 {
            register_kill(&mut world, Vec2::ZERO, 10_000.0 + i as f64 * 100.0);
        }
        // +1 at streak 5, +2 at streak 10.
        assert_eq!(world.coins, 3);
    }

    #[test]
    fn test_high_combo_triggers_slow_motion() {
        let mut world = World::new(11);
        for i in 0..11 {
            register_kill(&mut world, Vec2::ZERO, 10_000.0 + i as f64 * 100.0);
        }
        assert!(world.combo.count >= 10);
        assert!(world.fx.slow_motion > 0);
        assert!(world.fx.screen_shake >= 8.0);
    }

    #[test]
    fn test_lapse_announces_big_combo() {
        let mut world = World::new(11);
        for i in 0..5 {
            register_kill(&mut world, Vec2::ZERO, 10_000.0 + i as f64 * 100.0);
        }
        assert!(world.combo.count > COMBO_LOST_THRESHOLD);

        for _ in 0..COMBO_TIMER_TICKS {
            tick_combo(&mut world);
        }
        assert_eq!(world.combo.count, 1);
        assert_eq!(world.combo.multiplier, 1.0);
        assert!(world.fx.popups.iter().any(|p| p.text == "COMBO LOST!"));
    }

    #[test]
    fn test_lapse_of_small_combo_is_silent() {
        let mut world = World::new(11);
        register_kill(&mut world, Vec2::ZERO, 10_000.0);
        for _ in 0..COMBO_TIMER_TICKS {
            tick_combo(&mut world);
        }
        assert_eq!(world.combo.count, 0);
        assert!(world.fx.popups.iter().all(|p| p.text != "COMBO LOST!"));
    }
}
