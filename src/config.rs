//! Configuration
//!
//! Loaded from a TOML file, then environment variables, then command-line
//! flags, each layer overriding the previous one.

use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "mood_journal";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub seed: SeedConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Startup sample-data fetch
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_seed_enabled")]
    pub enabled: bool,

    #[serde(default = "default_seed_url")]
    pub url: String,

    /// Records kept from the feed
    #[serde(default = "default_seed_limit")]
    pub limit: usize,

    #[serde(default = "default_seed_timeout")]
    pub timeout_secs: u64,
}

fn default_seed_enabled() -> bool {
    true
}

fn default_seed_url() -> String {
    "https://jsonplaceholder.typicode.com/comments".to_string()
}

fn default_seed_limit() -> usize {
    20
}

fn default_seed_timeout() -> u64 {
    10
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_seed_enabled(),
            url: default_seed_url(),
            limit: default_seed_limit(),
            timeout_secs: default_seed_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file. The terminal is owned by the UI, so logs never go to stdout.
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join(APP_DIR).join("journal.log"))
        .unwrap_or_else(|| PathBuf::from("journal.log"))
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Terminal mood journal
#[derive(Debug, Default, Parser)]
#[command(name = "journal", version)]
pub struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the seed endpoint
    #[arg(long)]
    pub seed_url: Option<String>,

    /// Start with an empty journal instead of fetching sample entries
    #[arg(long)]
    pub no_seed: bool,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Resolves the full configuration for a run. An explicit `--config` that
    /// cannot be read is an error; the default locations are optional.
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::load_default()?,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.apply_args(args);
        Ok(config)
    }

    fn load_default() -> Result<Self, ConfigError> {
        let candidates = [
            dirs::config_dir().map(|p| p.join(APP_DIR).join("config.toml")),
            Some(PathBuf::from("./journal.toml")),
        ];

        for path in candidates.iter().flatten() {
            if path.exists() {
                return Self::load(path);
            }
        }
        Ok(Config::default())
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("JOURNAL_SEED_URL") {
            self.seed.url = url;
        }
        if let Some(limit) = var("JOURNAL_SEED_LIMIT").and_then(|v| v.parse().ok()) {
            self.seed.limit = limit;
        }
        if let Some(level) = var("JOURNAL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(file) = var("JOURNAL_LOG_FILE") {
            self.logging.file = PathBuf::from(file);
        }
    }

    fn apply_args(&mut self, args: &Args) {
        if let Some(url) = &args.seed_url {
            self.seed.url = url.clone();
        }
        if args.no_seed {
            self.seed.enabled = false;
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}
