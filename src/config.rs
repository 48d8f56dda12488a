use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::warn;
use serde::Deserialize;

use crate::utils::APP_NAME;

/// Optional startup defaults, read from `<config dir>/music-timer/config.toml`.
/// CLI flags take precedence over every field here. The file is never
/// written by the program.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub minutes: Option<f64>,
    pub volume: Option<u8>,
    pub music_dir: Option<PathBuf>,
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
    }

    /// Load the config file if one exists. A missing file is the normal
    /// case; a malformed one is reported and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring config file: {e:#}");
                Self::default()
            }
        }
    }

    fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {:?}", path))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config TOML from {:?}", path))
    }
}
