//! Runtime configuration loaded from JSON.
//!
//! Every field is optional in the file; anything omitted falls back to the
//! defaults in [`crate::constants`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::presentation::PresentationSettings;
use crate::pursuit::PursuitSettings;
use crate::SIMULATION_HZ;

/// Failure while loading [`GameSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The file is not valid settings JSON.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// The fixed simulation rate must be a positive, finite number.
    #[error("simulation_hz must be positive and finite, got {0}")]
    InvalidRate(f64),
    /// A pursuit tuning value is negative or not a number.
    #[error("pursuit.{field} must be finite and non-negative, got {value}")]
    InvalidPursuit {
        /// Name of the offending field.
        field: &'static str,
        /// Value found in the file.
        value: f32,
    },
}

/// Top-level game configuration.
///
/// # Examples
///
/// ```
/// use heroes::settings::GameSettings;
///
/// let settings = GameSettings::from_json_str(r#"{ "pursuit": { "move_speed": 3.0 } }"#)
///     .expect("valid settings");
/// assert_eq!(settings.pursuit.move_speed, 3.0);
/// assert_eq!(settings.simulation_hz, 60.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Tuning applied to pursuers spawned by the host.
    pub pursuit: PursuitSettings,
    /// Dialogue box transition timings.
    pub presentation: PresentationSettings,
    /// Rate of the fixed simulation step in hertz.
    pub simulation_hz: f64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            pursuit: PursuitSettings::default(),
            presentation: PresentationSettings::default(),
            simulation_hz: SIMULATION_HZ,
        }
    }
}

impl GameSettings {
    /// Parses and validates settings from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed JSON and
    /// [`SettingsError::InvalidRate`] for a non-positive simulation rate and
    /// [`SettingsError::InvalidPursuit`] for negative or non-finite pursuit
    /// tuning.
    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()
    }

    /// Reads, parses and validates the settings file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] when the file cannot be read, otherwise
    /// the errors of [`Self::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    fn validate(self) -> Result<Self, SettingsError> {
        if !(self.simulation_hz.is_finite() && self.simulation_hz > 0.0) {
            return Err(SettingsError::InvalidRate(self.simulation_hz));
        }
        let pursuit = &self.pursuit;
        for (field, value) in [
            ("move_speed", pursuit.move_speed),
            ("attack_range", pursuit.attack_range),
            ("attack_cooldown", pursuit.attack_cooldown),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::InvalidPursuit { field, value });
            }
        }
        Ok(self)
    }
}
