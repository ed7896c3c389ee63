use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Directory holding project config and visit state.
pub const PROJECT_DIR: &str = ".sigungu";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// District GeoJSON, relative to the project root.
    #[serde(default = "default_districts")]
    pub districts: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            districts: default_districts(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// State file, relative to `.sigungu/`.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

impl StorageConfig {
    #[must_use]
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

impl EffectiveConfig {
    /// Absolute dataset path for `project_root`.
    #[must_use]
    pub fn dataset_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.project.data.districts)
    }

    /// Absolute state file path for `project_root`.
    #[must_use]
    pub fn state_path(&self, project_root: &Path) -> PathBuf {
        project_root
            .join(PROJECT_DIR)
            .join(&self.project.storage.state_file)
    }
}

#[must_use]
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_DIR).join("config.toml")
}

/// Load `.sigungu/config.toml`, or defaults when it does not exist.
///
/// # Errors
///
/// Returns [`Error::Storage`] if the file cannot be read and
/// [`Error::Config`] if it is not valid TOML for [`ProjectConfig`].
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    load_toml(&project_config_path(project_root))
}

/// Load `<config_dir>/sigungu/config.toml`, or defaults.
///
/// # Errors
///
/// Same as [`load_project_config`].
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_toml(&config_dir.join("sigungu/config.toml"))
}

fn load_toml<T: Default + for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str::<T>(&content).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge project config, user config, and the environment.
///
/// # Errors
///
/// Returns config load failures.
pub fn resolve_config(project_root: &Path, cli_json: bool) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(
        cli_json,
        user.output.as_deref(),
        env_format.as_deref(),
        std::io::stdout().is_terminal(),
    );

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
    })
}

/// Output mode precedence: `--json`, `FORMAT`, user config, TTY detection.
#[must_use]
pub fn resolve_output(
    cli_json: bool,
    user_output: Option<&str>,
    env_format: Option<&str>,
    is_tty: bool,
) -> String {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some("pretty"),
            "text" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return "json".to_string();
    }

    if let Some(mode) = env_format.and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if let Some(mode) = user_output.and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if is_tty { "pretty" } else { "text" }.to_string()
}

fn default_districts() -> PathBuf {
    PathBuf::from("sigungu.json")
}

fn default_state_file() -> PathBuf {
    PathBuf::from("state.json")
}

const fn default_lock_timeout_ms() -> u64 {
    1_000
}
