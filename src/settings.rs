//! Game settings and preferences
//!
//! Persisted as a small JSON file next to the best score. A missing or
//! corrupt file silently falls back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Visual and accessibility preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake on hits and pickups
    pub screen_shake: bool,
    /// Full-screen flash on combos and pickups
    pub flash: bool,
    /// Particle effects (hit bursts, muzzle flashes)
    pub particles: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (suppresses shake and flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            flash: true,
            particles: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective flash (respects reduced_motion)
    pub fn effective_flash(&self) -> bool {
        self.flash && !self.reduced_motion
    }

    /// Load settings from a JSON file, defaulting on any failure.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring malformed settings file: {err}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged, never fatal.
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("failed to save settings: {err}");
                }
            }
            Err(err) => log::warn!("failed to serialize settings: {err}"),
        }
    }
}
