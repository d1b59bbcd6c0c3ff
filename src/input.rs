//! Movement and shooting intent
//!
//! The host translates its key events into this snapshot outside the
//! tick; the sim only ever reads it. Four movement directions, four
//! shoot directions, nothing else.

use glam::Vec2;

use crate::consts::DIAGONAL_FACTOR;

/// Input snapshot for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,

    pub shoot_up: bool,
    pub shoot_down: bool,
    pub shoot_left: bool,
    pub shoot_right: bool,
}

impl InputState {
    /// Movement vector for this tick, diagonal axes scaled by 0.707 so
    /// diagonal travel is no faster than straight travel.
    pub fn movement(&self) -> Vec2 {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.move_up {
            dy -= 1.0;
        }
        if self.move_down {
            dy += 1.0;
        }
        if self.move_left {
            dx -= 1.0;
        }
        if self.move_right {
            dx += 1.0;
        }
        if dx != 0.0 && dy != 0.0 {
            dx *= DIAGONAL_FACTOR;
            dy *= DIAGONAL_FACTOR;
        }
        Vec2::new(dx, dy)
    }

    /// Held shoot directions, in the fixed priority order the weapon
    /// tries them (up, down, left, right).
    pub fn shoot_directions(&self) -> impl Iterator<Item = Vec2> + '_ {
        [
            (self.shoot_up, Vec2::new(0.0, -1.0)),
            (self.shoot_down, Vec2::new(0.0, 1.0)),
            (self.shoot_left, Vec2::new(-1.0, 0.0)),
            (self.shoot_right, Vec2::new(1.0, 0.0)),
        ]
        .into_iter()
        .filter_map(|(held, dir)| held.then_some(dir))
    }
}
