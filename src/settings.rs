//! Session configuration
//!
//! Read once at startup from a JSON blob supplied by the host and never
//! written back. Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{GameState, Stats};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed seed; the host picks one from the clock when absent
    pub seed: Option<u64>,
    /// Start with the autopilot driving
    pub bot: bool,
    /// Verbose per-tick logging and hitbox overlay
    pub debug: bool,

    // === Audio ===
    pub muted: bool,
    /// Effects volume (0.0 - 1.0)
    pub volume: f32,

    /// Player movement tuning
    pub stats: Stats,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            bot: false,
            debug: false,
            muted: false,
            volume: 0.8,
            stats: Stats::default(),
        }
    }
}

/// Reasons a settings blob could not be used
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid player stats: {0}")]
    InvalidStats(&'static str),
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject tuning the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let stats = &self.stats;
        if !(stats.max_speed.is_finite() && stats.max_speed > 0.0) {
            return Err(SettingsError::InvalidStats("max_speed must be positive"));
        }
        if !(stats.acceleration.is_finite() && stats.acceleration > 0.0) {
            return Err(SettingsError::InvalidStats("acceleration must be positive"));
        }
        if !(stats.jump_force.is_finite() && stats.jump_force < 0.0) {
            return Err(SettingsError::InvalidStats("jump_force must be negative"));
        }
        Ok(())
    }

    /// Load from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Element id of the inline settings script on the page
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "settings";

    /// Read the page's `<script id="settings">` block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json.as_deref().map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from page");
                settings
            }
            Some(Err(err)) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Build a fresh session honouring these settings
    pub fn new_session(&self, fallback_seed: u64) -> GameState {
        let mut state = GameState::with_stats(self.seed.unwrap_or(fallback_seed), self.stats);
        state.bot = self.bot;
        state.debug = self.debug;
        state
    }
}
