//! Configuration management for Solace
//!
//! This module handles loading, parsing, validating, and defaulting
//! configuration from a YAML file.

use crate::error::{Result, SolaceError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Solace
///
/// Holds backend connection settings, credential store settings, and
/// session storage settings. Every field defaults so an absent or partial
/// config file still yields a runnable configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Model backend configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Credential store configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Session storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Model backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Default model for exchanges
    #[serde(default = "default_model")]
    pub model: String,

    /// Models the user may select from
    #[serde(default = "default_available_models")]
    pub available_models: Vec<String>,

    /// Sampling temperature sent with every request
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus-sampling top-p sent with every request
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Per-attempt request timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Maximum number of attempts per exchange
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between attempts (milliseconds); 0 disables backoff
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "mistral:latest".to_string()
}

fn default_available_models() -> Vec<String> {
    vec![
        "mistral:latest".to_string(),
        "phi3".to_string(),
        "llama2".to_string(),
        "codellama".to_string(),
    ]
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.9
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            model: default_model(),
            available_models: default_available_models(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Credential store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Path to the YAML credential file
    #[serde(default = "default_users_file")]
    pub users_file: PathBuf,
}

fn default_users_file() -> PathBuf {
    data_dir().join("users.yaml")
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            users_file: default_users_file(),
        }
    }
}

/// Session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding per-user session directories
    #[serde(default = "default_sessions_dir")]
    pub sessions_dir: PathBuf,

    /// Maximum number of sessions shown in listings
    #[serde(default = "default_max_listed_sessions")]
    pub max_listed_sessions: usize,
}

fn default_sessions_dir() -> PathBuf {
    data_dir().join("chat_sessions")
}

fn default_max_listed_sessions() -> usize {
    10
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            sessions_dir: default_sessions_dir(),
            max_listed_sessions: default_max_listed_sessions(),
        }
    }
}

/// Platform data directory for default storage paths
///
/// Falls back to the current directory when no home directory is available.
fn data_dir() -> PathBuf {
    ProjectDirs::from("", "", "solace")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// An absent file yields the default configuration; a present but
    /// malformed file is an error.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(
                "No configuration file at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            SolaceError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_yaml::from_str(&contents).map_err(|e| {
            SolaceError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `SolaceError::Config` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.backend.host.is_empty() {
            return Err(SolaceError::Config("backend.host must not be empty".to_string()).into());
        }
        if !self.backend.host.starts_with("http://") && !self.backend.host.starts_with("https://") {
            return Err(SolaceError::Config(format!(
                "backend.host must be an http(s) URL, got '{}'",
                self.backend.host
            ))
            .into());
        }
        if self.backend.max_retries == 0 {
            return Err(
                SolaceError::Config("backend.max_retries must be at least 1".to_string()).into(),
            );
        }
        if !(0.0..=2.0).contains(&self.backend.temperature) {
            return Err(SolaceError::Config(format!(
                "backend.temperature must be in [0, 2], got {}",
                self.backend.temperature
            ))
            .into());
        }
        if !(0.0..=1.0).contains(&self.backend.top_p) {
            return Err(SolaceError::Config(format!(
                "backend.top_p must be in [0, 1], got {}",
                self.backend.top_p
            ))
            .into());
        }
        if self.backend.available_models.is_empty() {
            return Err(SolaceError::Config(
                "backend.available_models must not be empty".to_string(),
            )
            .into());
        }
        if !self
            .backend
            .available_models
            .contains(&self.backend.model)
        {
            return Err(SolaceError::Config(format!(
                "backend.model '{}' is not in backend.available_models",
                self.backend.model
            ))
            .into());
        }
        Ok(())
    }
}
