//! Dodge Blitz entry point
//!
//! Headless demo driver: a trivial bot plays a seeded run at the
//! nominal tick rate and the final stats are printed. Useful for
//! exercising the full lifecycle and for balance eyeballing;
//! presentation lives behind the `RenderSink` boundary and is not part
//! of this binary.

use std::path::PathBuf;

use dodge_blitz::consts::TICK_RATE;
use dodge_blitz::game::{Game, NullHudSink};
use dodge_blitz::input::InputState;
use dodge_blitz::render::{NullRenderSink, RenderSink};
use dodge_blitz::sim::World;
use dodge_blitz::{HighScore, Settings};

/// Pick the shoot direction whose axis best lines up with the nearest
/// enemy; wander toward the arena center otherwise.
fn bot_input(world: &World) -> InputState {
    let mut input = InputState::default();

    let center = glam::Vec2::new(world.width / 2.0, world.height / 2.0);
    let to_center = center - world.player.pos;
    if to_center.x.abs() > 40.0 {
        input.move_right = to_center.x > 0.0;
        input.move_left = to_center.x < 0.0;
    }
    if to_center.y.abs() > 40.0 {
        input.move_down = to_center.y > 0.0;
        input.move_up = to_center.y < 0.0;
    }

    let nearest = world.enemies.iter().min_by(|a, b| {
        let da = (a.pos - world.player.pos).length_squared();
        let db = (b.pos - world.player.pos).length_squared();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });
    if let Some(enemy) = nearest {
        let delta = enemy.pos - world.player.pos;
        if delta.x.abs() > delta.y.abs() {
            input.shoot_right = delta.x > 0.0;
            input.shoot_left = delta.x < 0.0;
        } else {
            input.shoot_down = delta.y > 0.0;
            input.shoot_up = delta.y < 0.0;
        }
    }

    input
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xD0D6E);
    let max_ticks: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60 * 60 * 5); // five minutes of play

    let data_dir = PathBuf::from(".");
    let settings = Settings::load(&data_dir.join("settings.json"));
    let score_path = data_dir.join("highscore.json");
    let mut high_score = HighScore::load(&score_path);

    let mut game = Game::new(
        seed,
        settings,
        Box::new(NullHudSink),
        Box::new(|stats| {
            println!(
                "game over: {} kills, {} coins collected",
                stats.kills, stats.coins
            );
        }),
    );
    let mut sink = NullRenderSink;

    game.prepare_for_new_run();
    game.start_run();

    let ms_per_tick = 1000.0 / TICK_RATE as f64;
    let mut ticks = 0u64;
    while game.is_running() && ticks < max_ticks {
        let input = bot_input(game.world());
        game.step(&input, ticks as f64 * ms_per_tick);
        sink.present(&game.frame());
        ticks += 1;
    }

    let stats = game.get_stats();
    println!(
        "run ended after {ticks} ticks: {} kills, {} coins",
        stats.kills, stats.coins
    );
    if high_score.observe(stats) {
        println!("new best: {} kills", high_score.best_kills);
        high_score.save(&score_path);
    } else {
        println!("best so far: {} kills", high_score.best_kills);
    }
}
