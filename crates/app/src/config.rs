//! Front-end configuration. Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use terrace::GeneratorConfig;

/// Settings for the headless front end plus the generator parameters it edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Parameters handed to every generation pass.
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// How many passes to run back to back (each one replaces the last mesh).
    #[serde(default = "default_runs")]
    pub runs: u32,
    /// Sleep between polls of the background worker, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_runs() -> u32 {
    1
}
fn default_poll_interval_ms() -> u64 {
    16
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            runs: default_runs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl AppConfig {
    /// Load config from `path`. If the file is missing or invalid, returns default config.
    pub fn load(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `path`. Logs on error.
    pub fn save(&self, path: &Path) {
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }
}

/// `config.ron` in the current directory.
pub fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
