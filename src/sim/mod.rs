//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the world
//! - No rendering or platform dependencies
//!
//! The one sanctioned impurity is the host-supplied wall-clock
//! timestamp threaded into `tick` for the combo window.

pub mod combat;
pub mod combo;
pub mod enemy;
pub mod fx;
pub mod powerups;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapon;

pub use combo::ComboState;
pub use fx::{FxState, Hitmarker, Particle, TextPopup};
pub use powerups::{EffectSlot, PowerupEffects};
pub use spawn::SpawnState;
pub use state::{
    Enemy, EnemyKind, EnemyProjectile, GameEvent, Helmet, Player, Powerup, PowerupKind,
    Projectile, RunPhase, RunStats, TravelRange, World,
};
pub use tick::tick;
pub use weapon::WeaponState;
