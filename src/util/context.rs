//! Global context for mosekfind operations.
//!
//! Provides centralized access to the working directory and the files a
//! configuration pass reads and writes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{global_config_path, load_config, project_config_path, Config};

/// Name of the project-local state directory.
pub const STATE_DIR: &str = ".mosekfind";

/// File holding the persisted configuration namespace.
pub const CACHE_FILE: &str = "cache.toml";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(GlobalContext::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext { cwd }
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Project-local state directory (`.mosekfind/`).
    pub fn state_dir(&self) -> PathBuf {
        self.cwd.join(STATE_DIR)
    }

    /// Persisted configuration namespace (`.mosekfind/cache.toml`).
    pub fn cache_path(&self) -> PathBuf {
        self.state_dir().join(CACHE_FILE)
    }

    /// Project configuration file (`.mosekfind/config.toml`).
    pub fn project_config_path(&self) -> PathBuf {
        project_config_path(&self.cwd)
    }

    /// Merged global and project configuration.
    pub fn load_config(&self) -> Config {
        match global_config_path() {
            Some(global) => load_config(&global, &self.project_config_path()),
            None => Config::load_or_default(&self.project_config_path()),
        }
    }
}
