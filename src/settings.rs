//! Run configuration
//!
//! Read from a JSON file; anything missing falls back to the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::FIXED_TIMESTEP;
use crate::sim::ContactPolicy;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "PLATFORM_BATTLE_SETTINGS";
/// Settings file used when the variable is unset
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Fixed timestep must be positive, got {0}")]
    InvalidTimestep(f32),
}

/// Which game to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    #[default]
    Battle,
    Lander,
    Pong,
}

impl SceneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKind::Battle => "battle",
            SceneKind::Lander => "lander",
            SceneKind::Pong => "pong",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "battle" => Some(SceneKind::Battle),
            "lander" | "lunar" => Some(SceneKind::Lander),
            "pong" => Some(SceneKind::Pong),
            _ => None,
        }
    }

    /// Window title
    pub fn title(&self) -> &'static str {
        match self {
            SceneKind::Battle => "BATTLE!",
            SceneKind::Lander => "Lunar Lander!",
            SceneKind::Pong => "Pong!",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scene: SceneKind,

    // === Simulation ===
    /// Seconds per simulation step
    pub fixed_timestep: f32,
    /// Cap on steps per frame (None = catch up fully)
    pub max_substeps: Option<u32>,
    pub contact_policy: ContactPolicy,
    /// Seed for serve directions
    pub seed: u64,

    // === Assets ===
    pub asset_dir: PathBuf,

    // === Headless run ===
    /// Simulated display refresh rate
    pub frame_rate: f32,
    /// Seconds to run before exiting
    pub run_seconds: f32,
    /// Let the autopilot press the keys
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene: SceneKind::Battle,
            fixed_timestep: FIXED_TIMESTEP,
            max_substeps: None,
            contact_policy: ContactPolicy::Sequential,
            seed: 0x5eed,
            asset_dir: PathBuf::from("assets"),
            frame_rate: 60.0,
            run_seconds: 20.0,
            autopilot: true,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from `path`, falling back to defaults if it is missing.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let settings = Self::load(path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Settings file location from the environment
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH))
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.fixed_timestep.is_nan() || self.fixed_timestep <= 0.0 {
            return Err(SettingsError::InvalidTimestep(self.fixed_timestep));
        }
        Ok(())
    }

    /// Wall-clock seconds per rendered frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "scene": "pong", "seed": 7 }"#).unwrap();

        assert_eq!(settings.scene, SceneKind::Pong);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.fixed_timestep, FIXED_TIMESTEP);
        assert_eq!(settings.contact_policy, ContactPolicy::Sequential);
    }

    #[test]
    fn test_contact_policy_from_json() {
        let settings = Settings::from_json(r#"{ "contact_policy": "MinPenetration" }"#).unwrap();
        assert_eq!(settings.contact_policy, ContactPolicy::MinPenetration);
    }

    #[test]
    fn test_rejects_bad_timestep() {
        let err = Settings::from_json(r#"{ "fixed_timestep": 0.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidTimestep(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ scene: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("platform-battle-missing-settings.json");
        let settings = Settings::load_or_default(&path).unwrap();
        assert_eq!(settings.scene, SceneKind::Battle);
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("platform-battle-{}.json", std::process::id()));
        let settings = Settings {
            scene: SceneKind::Lander,
            max_substeps: Some(4),
            ..Default::default()
        };
        std::fs::write(&path, settings.to_json().unwrap()).unwrap();

        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.scene, SceneKind::Lander);
        assert_eq!(loaded.max_substeps, Some(4));
    }

    #[test]
    fn test_scene_names() {
        assert_eq!(SceneKind::from_str("Lunar"), Some(SceneKind::Lander));
        assert_eq!(SceneKind::from_str("tetris"), None);
        assert_eq!(SceneKind::Pong.as_str(), "pong");
    }
}
