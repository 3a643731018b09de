//! Configuration for the `Taskboard` client.
//!
//! Layered with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskboard/config.toml`)
//! 4. Compiled defaults
//!
//! A missing config file is not an error (defaults are used). An
//! explicit `--config` path that doesn't exist is an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiFileConfig,
    demo: DemoFileConfig,
}

/// `[api]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ApiFileConfig {
    request_timeout_secs: Option<u64>,
}

/// `[demo]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct DemoFileConfig {
    seed_tasks: Option<usize>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Backend call settings (used by `BoardController`).
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Deadline for a single backend call; expiry counts as a failure.
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Demo binary settings.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// How many tasks to seed the in-memory backend with.
    pub seed_tasks: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { seed_tasks: 6 }
    }
}

/// Fully resolved client configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Backend call settings.
    pub api: ApiConfig,
    /// Demo binary settings.
    pub demo: DemoConfig,
}

/// Command-line arguments.
#[derive(Debug, Default, clap::Parser)]
#[command(name = "taskboard", about = "Kanban task board demo")]
pub struct CliArgs {
    /// Path to a TOML config file (default: ~/.config/taskboard/config.toml).
    #[arg(long, env = "TASKBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter (e.g. "info", "taskboard=debug").
    #[arg(long, env = "TASKBOARD_LOG", default_value = "info")]
    pub log_level: String,

    /// Number of demo tasks to seed.
    #[arg(long, env = "TASKBOARD_SEED")]
    pub seed: Option<usize>,

    /// Backend call timeout in seconds.
    #[arg(long, env = "TASKBOARD_TIMEOUT")]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Loads and resolves configuration from CLI args, the config file,
    /// and compiled defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an explicitly given `--config` file
    /// cannot be read, or when the file exists but is not valid TOML.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => Self::read_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::read_file(&path)?,
                _ => ConfigFile::default(),
            },
        };

        let request_timeout_secs = cli
            .timeout_secs
            .or(file.api.request_timeout_secs)
            .unwrap_or(10);
        let seed_tasks = cli
            .seed
            .or(file.demo.seed_tasks)
            .unwrap_or_else(|| DemoConfig::default().seed_tasks);

        Ok(Self {
            api: ApiConfig {
                request_timeout: Duration::from_secs(request_timeout_secs),
            },
            demo: DemoConfig { seed_tasks },
        })
    }

    fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Default config file location (`~/.config/taskboard/config.toml`).
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskboard").join("config.toml"))
}
