//! Configuration file support for patchup.
//!
//! Settings come from, highest priority first: command-line flags,
//! `patchup.toml` in the working directory, the global
//! `<config dir>/patchup/config.toml`, then built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use patchup_core::DEFAULT_PATCH_DIR;
use patchup_logging::DEFAULT_LOG_LEVEL;

/// The project config file name
pub const CONFIG_FILE_NAME: &str = "patchup.toml";

/// Directory under the platform config dir holding the global config
pub const GLOBAL_CONFIG_DIR: &str = "patchup";

/// The global config file name
pub const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Contents of a patchup config file; every key is optional
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Patch directory used by every verb
    pub directory: Option<PathBuf>,
    /// Git binary to run
    pub git: Option<PathBuf>,
    /// Pass `-3` to `git am`
    pub three_way: Option<bool>,
    /// Diagnostic log level
    pub log_level: Option<String>,
}

impl FileConfig {
    /// Load a config file.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(Some(config))
    }

    pub fn load_project(working_dir: &Path) -> Result<Option<Self>> {
        Self::load_from(&working_dir.join(CONFIG_FILE_NAME))
    }

    pub fn load_global() -> Result<Option<Self>> {
        match Self::global_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILE))
    }

    /// Keys set in `self` win over `fallback`
    fn or(self, fallback: Self) -> Self {
        Self {
            directory: self.directory.or(fallback.directory),
            git: self.git.or(fallback.git),
            three_way: self.three_way.or(fallback.three_way),
            log_level: self.log_level.or(fallback.log_level),
        }
    }
}

/// Effective settings after layering the config files over the defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub patch_dir: PathBuf,
    pub git: PathBuf,
    pub three_way: bool,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            patch_dir: PathBuf::from(DEFAULT_PATCH_DIR),
            git: PathBuf::from("git"),
            three_way: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Load the global and project config files
    pub fn load(working_dir: &Path) -> Result<Self> {
        let global = FileConfig::load_global().context("Failed to load global configuration")?;
        let project =
            FileConfig::load_project(working_dir).context("Failed to load project configuration")?;

        Ok(Self::resolve(project, global))
    }

    /// Priority: project > global > defaults
    pub fn resolve(project: Option<FileConfig>, global: Option<FileConfig>) -> Self {
        let merged = project
            .unwrap_or_default()
            .or(global.unwrap_or_default());
        let defaults = Self::default();

        Self {
            patch_dir: merged.directory.unwrap_or(defaults.patch_dir),
            git: merged.git.unwrap_or(defaults.git),
            three_way: merged.three_way.unwrap_or(defaults.three_way),
            log_level: merged.log_level.unwrap_or(defaults.log_level),
        }
    }

    /// The `--directory` flag wins over the configured patch directory
    pub fn patch_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.unwrap_or_else(|| self.patch_dir.clone())
    }
}
