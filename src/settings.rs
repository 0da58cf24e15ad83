//! Round timing and session settings
//!
//! Persisted as JSON by the host. Every field has a default so partial files
//! load fine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Core settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Time budget of one round (ms)
    pub round_time_ms: u64,
    /// Nominal host tick interval (ms)
    pub tick_interval_ms: u64,
    /// Cosmetic delay between time-up and round completion (ms)
    pub time_up_delay_ms: u64,
    /// Remaining time below which per-second warnings fire (ms, 0 = never)
    pub warning_threshold_ms: u64,

    // === Randomness ===
    /// Fixed seed for reproducible sessions (None = entropy)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_time_ms: ROUND_TIME_MS,
            tick_interval_ms: TICK_INTERVAL_MS,
            time_up_delay_ms: TIME_UP_DELAY_MS,
            warning_threshold_ms: WARNING_THRESHOLD_MS,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Reject values the round controller cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.round_time_ms == 0 {
            return Err(SettingsError::Invalid {
                field: "round_time_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(SettingsError::Invalid {
                field: "tick_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.tick_interval_ms > self.round_time_ms {
            return Err(SettingsError::Invalid {
                field: "tick_interval_ms",
                reason: format!(
                    "{} ms is longer than the round ({} ms)",
                    self.tick_interval_ms, self.round_time_ms
                ),
            });
        }
        Ok(())
    }
}
