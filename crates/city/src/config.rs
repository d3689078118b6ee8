//! City viewer configuration. Loaded from config.ron at startup.

use anyhow::Context;
use layout::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent settings. Loaded from `config.ron` in the current directory unless `--config` names another file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityConfig {
    /// Directory holding the analyzed datasets and their `files.json` index.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Dataset shown when none is named on the command line. First discovered one when unset.
    #[serde(default)]
    pub dataset: Option<String>,
    /// Seed for colors and decorations. Random per run when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Start with the night lighting preset.
    #[serde(default)]
    pub night_mode: bool,
    /// Where `analyze` clones remote repositories.
    #[serde(default = "default_checkout_dir")]
    pub checkout_dir: PathBuf,
    #[serde(default)]
    pub layout: LayoutConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_checkout_dir() -> PathBuf {
    std::env::temp_dir().join("codecity")
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            dataset: None,
            seed: None,
            night_mode: false,
            checkout_dir: default_checkout_dir(),
            layout: LayoutConfig::default(),
        }
    }
}

impl CityConfig {
    /// Load config from `path`, or `config.ron` when `None`. If the file is missing or invalid, returns default config.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
        if let Ok(data) = std::fs::read_to_string(&path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save to `path` as pretty RON.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let s = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, s).with_context(|| format!("could not write config to {}", path.display()))?;
        log::info!("Saved config to {}", path.display());
        Ok(())
    }
}

/// `config.ron` in the current directory.
pub fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
