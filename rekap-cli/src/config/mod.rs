//! Configuration file handling
//!
//! Settings live in `<config dir>/rekap/config.toml`. Every field has a
//! default, so a missing file or a partial file is fine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::attendance::AttendanceRules;

const APP_DIR: &str = "rekap";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where stored uploads, recaps and letters are written
    pub output_dir: PathBuf,
    /// Letter template; the built-in one is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,
    /// Accepted upload extensions, without the dot
    pub allowed_extensions: Vec<String>,
    pub rules: AttendanceRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("uploads"),
            template_path: None,
            allowed_extensions: vec!["xlsx".to_string(), "xls".to_string()],
            rules: AttendanceRules::default(),
        }
    }
}

/// Default config file location (~/.config/rekap/config.toml on Linux)
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

impl Config {
    /// Load from `path`, or from the default location
    ///
    /// An explicit path must exist; the default one may be missing.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file does not exist: {}", path.display());
                }
                Self::from_file(path)?
            }
            None => {
                let path = config_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    log::debug!("No config at {}, using defaults", path.display());
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<()> {
        if self.allowed_extensions.is_empty() {
            bail!("allowed_extensions must not be empty");
        }
        if let Some(ext) = self
            .allowed_extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            bail!(
                "Invalid extension '{}' in allowed_extensions (write it without the dot)",
                ext
            );
        }
        self.rules.validate().context("Invalid [rules] section")
    }
}
