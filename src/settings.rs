//! World settings
//!
//! Tunable knobs for a session, stored as JSON. Every field has a default so
//! partial files load cleanly.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{BoatTuning, ChestTiming, SkipRules};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for fish placement, wandering and chest drops
    pub seed: u64,
    /// Rest level of the water surface
    pub water_height: f32,
    /// Seabed level the chest rests on
    pub ground_height: f32,
    pub fish_count: usize,
    pub boat: BoatTuning,
    pub stones: SkipRules,
    pub chest: ChestTiming,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            water_height: 0.0,
            ground_height: -1.3,
            fish_count: 20,
            boat: BoatTuning::default(),
            stones: SkipRules::default(),
            chest: ChestTiming::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {e}; using default settings", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {e}; using default settings", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = self.to_json().map_err(io::Error::other)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "boat": { "max_speed": 12.0 } }"#)
            .expect("valid json");
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.boat.max_speed, 12.0);
        assert_eq!(settings.boat.accel, 4.0);
        assert_eq!(settings.fish_count, 20);
        assert_eq!(settings.chest.ttl, 15.0);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json("{ seed: ").is_err());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("tidewater-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: 99,
            fish_count: 5,
            ..Default::default()
        };
        settings.save(&path).expect("write temp file");
        let loaded = Settings::load(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let loaded = Settings::load("/nonexistent/tidewater/settings.json");
        assert_eq!(loaded, Settings::default());
    }
}
