//! User-facing speech preferences with an explicit load/save boundary.
//!
//! Settings are read once at startup and passed down by value or
//! reference; callers persist changes back with [`Settings::save`].
//! There is no ambient global state.

use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: Language,
    pub voice_input_enabled: bool,
    pub voice_output_enabled: bool,
    /// Overrides the per-language prebuilt voice when set.
    pub voice_override: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::En,
            voice_input_enabled: false,
            voice_output_enabled: false,
            voice_override: None,
        }
    }
}

impl Settings {
    /// Reads settings from `path`. A missing file yields the defaults;
    /// any other failure is reported to the caller.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no settings file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the settings to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::debug!("saved settings to {}", path.display());
        Ok(())
    }
}
