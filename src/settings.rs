//! World settings
//!
//! Tunable parameters for a run. Defaults reproduce the classic meadow; a page
//! may override any subset with an inline JSON block.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while reading settings
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// The JSON parsed but describes an unplayable world
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "settings parse error: {}", e),
            ConfigError::Invalid(reason) => write!(f, "invalid settings: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// World parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    /// Surface width in pixels
    pub width: f32,
    /// Surface height in pixels
    pub height: f32,
    /// Safe zone at the top; hatchlings crossing it are rescued
    pub top_margin: f32,

    // === Pacing ===
    /// Frame rate cap
    pub fps: f32,
    /// Delay between egg spawns (ms)
    pub egg_interval_ms: f32,
    /// Egg capacity ceiling
    pub max_eggs: usize,

    // === Population ===
    /// Obstacles requested at init (may under-fill)
    pub obstacle_count: usize,
    /// Size of the enemy pool
    pub enemy_count: usize,

    /// Start with debug overlays on
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            top_margin: TOP_MARGIN,

            fps: FPS,
            egg_interval_ms: 1000.0,
            max_eggs: 10,

            obstacle_count: 10,
            enemy_count: 3,

            debug: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject worlds the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::Invalid("width and height must be positive"));
        }
        if !(self.fps > 0.0) {
            return Err(ConfigError::Invalid("fps must be positive"));
        }
        if !(self.top_margin >= 0.0 && self.top_margin < self.height) {
            return Err(ConfigError::Invalid("top_margin must lie inside the surface"));
        }
        Ok(())
    }

    /// Minimum time between rendered frames (ms)
    pub fn frame_interval_ms(&self) -> f32 {
        1000.0 / self.fps
    }

    /// Element holding an optional inline JSON override
    const ELEMENT_ID: &'static str = "game-settings";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = text {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::ELEMENT_ID);
                    return settings;
                }
                Err(e) => log::warn!("Ignoring #{}: {}", Self::ELEMENT_ID, e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No #{} on native, using defaults", Self::ELEMENT_ID);
        Self::default()
    }
}
