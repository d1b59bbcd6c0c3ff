//! Best-score persistence
//!
//! A single integer - the most kills in one run - kept in a small JSON
//! file. Nothing else about a run is persisted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::RunStats;

/// The single best score across runs
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub best_kills: u32,
}

impl HighScore {
    /// Fold a finished run in; returns true if it set a new best.
    pub fn observe(&mut self, stats: RunStats) -> bool {
        if stats.kills > self.best_kills {
            self.best_kills = stats.kills;
            return true;
        }
        false
    }

    /// Load from a JSON file, defaulting to zero on any failure.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(score) => score,
                Err(err) => {
                    log::warn!("ignoring malformed high score file: {err}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save; failures are logged, never fatal.
    pub fn save(&self, path: &Path) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("failed to save high score: {err}");
                } else {
                    log::info!("high score saved: {}", self.best_kills);
                }
            }
            Err(err) => log::warn!("failed to serialize high score: {err}"),
        }
    }
}
