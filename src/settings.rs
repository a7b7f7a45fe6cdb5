//! Presentation settings
//!
//! Colors and the scoreboard font. Gameplay constants live in `consts` and
//! are not configurable. Read from LocalStorage on the web, never written.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{ROWS, SCOREBOARD_FONT};
use crate::sim::scene::{Color, Font};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid scoreboard font {0:?} (expected Family-Size or Family-Style-Size)")]
    InvalidFont(String),
    #[error("scoreboard font size {0} exceeds {max}", max = MAX_FONT_SIZE)]
    FontTooLarge(f32),
}

/// Largest accepted scoreboard font size
pub const MAX_FONT_SIZE: f32 = 72.0;

/// Display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Brick color for each row, top row first
    pub brick_palette: [Color; ROWS],
    pub ball_color: Color,
    pub paddle_color: Color,
    pub label_color: Color,
    /// Clear color behind the scene
    pub background: Color,
    /// Scoreboard font, e.g. `SansSerif-36`
    pub scoreboard_font: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brick_palette: [Color::RED, Color::BLUE, Color::ORANGE, Color::GREEN, Color::YELLOW],
            ball_color: Color::BLACK,
            paddle_color: Color::BLACK,
            label_color: Color::GRAY,
            background: Color::WHITE,
            scoreboard_font: SCOREBOARD_FONT.to_string(),
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "breakout_settings";

    /// Parse and validate settings JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<Font, SettingsError> {
        let font = Font::parse(&self.scoreboard_font)
            .ok_or_else(|| SettingsError::InvalidFont(self.scoreboard_font.clone()))?;
        if font.size > MAX_FONT_SIZE {
            return Err(SettingsError::FontTooLarge(font.size));
        }
        Ok(font)
    }

    /// Scoreboard font, falling back to 36pt sans-serif if invalid
    pub fn font(&self) -> Font {
        self.validate().unwrap_or_else(|_| Font::new("SansSerif", 36.0))
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
