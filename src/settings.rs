//! Player settings and preferences
//!
//! Persisted in LocalStorage on the web build and as a JSON file natively.

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::sim::{BoardConfig, RiskTier, RowCount};

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Peg rows (8, 12 or 16)
    pub rows: RowCount,
    /// Multiplier range
    pub risk: RiskTier,
    /// Stake placed on each drop
    pub bet: i64,

    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let board = BoardConfig::default();
        Self {
            rows: board.rows,
            risk: board.risk,
            bet: 100,
            canvas_width: board.canvas_width,
            canvas_height: board.canvas_height,
        }
    }
}

impl Settings {
    /// Validated board layout for these settings
    pub fn board_config(&self) -> Result<BoardConfig, SimError> {
        BoardConfig::new(self.rows.get(), self.risk, self.canvas_width, self.canvas_height)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "plinko_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults if it is missing
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, crate::error::SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = serde_json::from_str(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Save settings to a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), crate::error::SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.rows, RowCount::Twelve);
        assert_eq!(settings.risk, RiskTier::Normal);
        assert_eq!(settings.bet, 100);
        assert_eq!(settings.board_config().unwrap(), BoardConfig::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"rows":16,"risk":"high"}"#).unwrap();
        assert_eq!(settings.rows, RowCount::Sixteen);
        assert_eq!(settings.risk, RiskTier::High);
        assert_eq!(settings.bet, 100);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("plinko_settings_{}.json", std::process::id()));
        let settings = Settings {
            rows: RowCount::Eight,
            risk: RiskTier::Low,
            bet: 250,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
    }
}
