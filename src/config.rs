//! Run configuration
//!
//! Loaded once before the engine starts, the way the host menu would
//! collect a pilot name and difficulty selection.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::difficulty::Difficulty;

/// Configuration handed to the engine before the first resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Pilot name shown in the HUD
    pub player_name: String,
    pub difficulty: Difficulty,
    /// Fixed RNG seed for reproducible runs; random when absent
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            player_name: "Pilot".to_string(),
            difficulty: Difficulty::Easy,
            seed: None,
        }
    }
}

impl RunConfig {
    /// Load from a JSON file, falling back to defaults if the file is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring malformed config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
