//! Persisted user settings
//!
//! A flat JSON object written wholesale after every change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::settings::{DEFAULT_DATA_DIR, DEFAULT_FONT_SIZE, MIN_FONT_SIZE};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// UI font size in points
    pub fontsize: i32,
    /// Directory the Load CSV dialog opens in
    pub pathdata: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fontsize: DEFAULT_FONT_SIZE,
            pathdata: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl Settings {
    /// Read settings from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            log::info!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write the whole settings object to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        log::info!("Saved settings {:?}", self);
        Ok(())
    }

    /// Change the font size by `delta` points, never going below the minimum
    pub fn adjust_font_size(&mut self, delta: i32) {
        self.fontsize = (self.fontsize + delta).max(MIN_FONT_SIZE);
    }
}
