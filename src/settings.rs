use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Console preferences. Tariff and emission tables are fixed and not read from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub color: bool,
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            color: true,
            json: false,
        }
    }
}

impl Settings {
    /// Reads the TOML file at `path`, or returns defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read settings at {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse settings at {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Command-line flags win over the file.
    pub fn apply_flags(&mut self, json: bool, no_color: bool) {
        if json {
            self.json = true;
        }
        if no_color {
            self.color = false;
        }
    }
}
