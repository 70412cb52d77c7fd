//! Configuration for the pp command line

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How the CLI prints results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Pattern used by `pp render` when none is given
    #[serde(default)]
    pub default_pattern: Option<String>,

    /// Output format
    #[serde(default)]
    pub output: OutputFormat,
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::read(config_path);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("promptpatterns").join("config.yml")),
            Some(PathBuf::from("promptpatterns.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::read(path);
            }
        }

        Ok(Config::default())
    }

    fn read(path: &Path) -> Result<Self> {
        debug!(?path, "Reading config");
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config {}", path.display()))
    }
}
