//! Configuration for where activities and practices are kept.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the activities file.
pub const ACTIVITIES_FILE_ENV: &str = "DELIBERATE_ACTIVITIES_FILE";
/// Environment variable overriding the practices file.
pub const PRACTICES_FILE_ENV: &str = "DELIBERATE_PRACTICES_FILE";

/// Top-level deliberate configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliberateConfig {
    /// Plain text file with one activity per line.
    #[serde(default = "default_activities_file")]
    pub activities_file: PathBuf,
    /// Where practice records are stored.
    #[serde(default = "default_practices_file")]
    pub practices_file: PathBuf,
}

fn default_activities_file() -> PathBuf {
    PathBuf::from("user_files").join("my_deliberate_practice_activities.txt")
}

fn default_practices_file() -> PathBuf {
    PathBuf::from("user_files").join("my_deliberate_practice_practices.txt")
}

impl Default for DeliberateConfig {
    fn default() -> Self {
        Self {
            activities_file: default_activities_file(),
            practices_file: default_practices_file(),
        }
    }
}

impl DeliberateConfig {
    /// Parse a config file's contents. Relative paths are resolved against
    /// `base_dir`.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self> {
        let mut config: DeliberateConfig =
            toml::from_str(content).context("failed to parse config TOML")?;
        config.activities_file = resolve(base_dir, &config.activities_file);
        config.practices_file = resolve(base_dir, &config.practices_file);
        Ok(config)
    }

    /// Apply `DELIBERATE_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Some(path) = env_path(ACTIVITIES_FILE_ENV) {
            self.activities_file = path;
        }
        if let Some(path) = env_path(PRACTICES_FILE_ENV) {
            self.practices_file = path;
        }
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `deliberate.toml` in the current directory
/// 2. `~/.config/deliberate/config.toml`
///
/// Environment variable overrides: `DELIBERATE_ACTIVITIES_FILE`,
/// `DELIBERATE_PRACTICES_FILE`.
pub fn load_config() -> Result<DeliberateConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<DeliberateConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("deliberate.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
            tracing::debug!("using config {}", path.display());
            DeliberateConfig::from_toml_str(&content, base_dir)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => DeliberateConfig::default(),
    };

    config.apply_env_overrides();
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("deliberate"))
}
