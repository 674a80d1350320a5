//! Configuration file support for mosekfind.
//!
//! mosekfind supports two configuration file locations:
//! - Global: `~/.mosekfind/config.toml` - User-wide defaults
//! - Project: `.mosekfind/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! These files tune *how* MOSEK is searched for (extra install prefixes,
//! probe programs). Values describing *what* was found live in the cache
//! (see [`crate::core::settings::Settings`]).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::fs::read_to_string;

/// mosekfind configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search settings
    pub search: SearchConfig,

    /// Probe program overrides
    pub probes: ProbeConfig,
}

/// Search-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Extra installation prefixes tried when no root is given
    #[serde(default)]
    pub system_prefixes: Vec<PathBuf>,

    /// Don't look for installations under the home directory
    #[serde(default)]
    pub skip_home_installs: bool,
}

/// Programs used by the command probes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// MATLAB executable (default: `matlab`)
    pub matlab: Option<PathBuf>,

    /// `mexext` helper (default: `mexext`)
    pub mexext: Option<PathBuf>,

    /// Python interpreter (default: `python3`)
    pub python: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Prefixes accumulate; project prefixes are tried first
        if !other.search.system_prefixes.is_empty() {
            let mut prefixes = other.search.system_prefixes;
            prefixes.append(&mut self.search.system_prefixes);
            self.search.system_prefixes = prefixes;
        }
        if other.search.skip_home_installs {
            self.search.skip_home_installs = true;
        }

        if other.probes.matlab.is_some() {
            self.probes.matlab = other.probes.matlab;
        }
        if other.probes.mexext.is_some() {
            self.probes.mexext = other.probes.mexext;
        }
        if other.probes.python.is_some() {
            self.probes.python = other.probes.python;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.mosekfind/config.toml)
/// 2. Global config (~/.mosekfind/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global mosekfind config directory (~/.mosekfind).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".mosekfind"))
}

/// Get the global config path (~/.mosekfind/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.mosekfind/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".mosekfind").join("config.toml")
}
