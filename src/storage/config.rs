//! Configuration handling
//!
//! Configuration is stored in `.kanban/config.toml` (project) and
//! `~/.config/kanban/config.toml` (global). Project values win over global
//! ones.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the per-project directory
pub const PROJECT_DIR: &str = ".kanban";

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// How the stored board is treated when loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Re-rank a stored layout with gaps or duplicate positions instead of refusing it
    pub normalize_on_load: bool,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            normalize_on_load: true,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LogSettings {
    /// Log filter directive (e.g. `info`, `kanban_order=debug`)
    pub level: Option<String>,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    pub board: BoardSettings,
    pub log: LogSettings,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    pub log: LogSettings,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Loads only the global configuration (outside any project)
    pub fn global_only() -> Result<Self> {
        Ok(Self {
            global: Self::load_global()?,
            ..Self::default()
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "kanban-order", "kanban")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(PROJECT_DIR).join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        if let Some(level) = &config.log.level {
            if level.trim().is_empty() {
                return Err(ConfigError::Invalid("log.level must not be empty".to_string()).into());
            }
        }

        Ok(config)
    }

    /// Finds the project root by looking for a `.kanban/` directory in
    /// `start` or any of its parents
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Finds the project root starting at the current directory
    pub fn find_project_root() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::find_project_root_from(&cwd)
    }

    /// Effective log filter: project, then global, then the default
    pub fn log_level(&self) -> &str {
        self.project
            .log
            .level
            .as_deref()
            .or(self.global.log.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Saves the project configuration
    pub fn save_project(&self) -> Result<()> {
        let root = self
            .project_root
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Not in a kanban project. Run 'kanban init' first."))?;
        let config_path = root.join(PROJECT_DIR).join("config.toml");

        let content =
            toml::to_string_pretty(&self.project).context("Failed to serialize project config")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write project config: {}", config_path.display()))
    }
}
