//! Game settings and preferences
//!
//! Read from an optional JSON file; anything missing falls back to defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Begin the session with sound off
    pub start_muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Directory the `data/` assets are resolved against
    pub asset_dir: PathBuf,

    // === Gameplay ===
    /// Keep the water/reward flags when the game is reset
    pub carry_flags_across_reset: bool,
    /// Pause on each level's introduction until dismissed
    pub show_intros: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            asset_dir: PathBuf::from("."),

            carry_flags_across_reset: true,
            show_intros: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings = serde_json::from_str(&json)
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e:#}; using default settings");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "start_muted": true, "show_intros": false }"#).unwrap();
        assert!(settings.start_muted);
        assert!(!settings.show_intros);
        assert!(settings.carry_flags_across_reset);
        assert_eq!(settings.music_volume, 0.7);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/nonexistent/happy-chicken/settings.json");
        assert!(Settings::load(path).is_err());
        assert_eq!(Settings::load_or_default(Some(path)), Settings::default());
        assert_eq!(Settings::load_or_default(None), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "happy-chicken-settings-{}.json",
            std::process::id()
        ));
        let settings = Settings {
            carry_flags_across_reset: false,
            master_volume: 0.25,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
