//! Site configuration
//!
//! Stored as TOML at `~/.folio/config.toml` unless `--config` points
//! elsewhere. A missing file means defaults; a malformed one is an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::AdminAccount;
use crate::core::services::ContactSettings;
use crate::paths;

/// Environment variable overriding `[contact] api_key`
pub const MAIL_API_KEY_ENV: &str = "FOLIO_MAIL_API_KEY";

/// Errors loading or saving the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written
    #[error("{path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("{path}: {source}")]
    Parse {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },

    /// The config could not be serialized
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// HTTP server
    #[serde(default)]
    pub server: ServerConfig,
    /// Document storage
    #[serde(default)]
    pub storage: StorageConfig,
    /// Admin account
    #[serde(default)]
    pub admin: AdminConfig,
    /// Contact form delivery
    #[serde(default)]
    pub contact: ContactConfig,
}

/// `[server]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

/// `[storage]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory; defaults to `~/.folio/data`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Re-read collection files changed by other processes
    #[serde(default)]
    pub watch: bool,
}

impl StorageConfig {
    /// Effective data directory
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(paths::data_dir)
    }
}

/// `[admin]`
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Login email
    #[serde(default)]
    pub email: String,
    /// Argon2 PHC string from `folio passwd`
    #[serde(default)]
    pub password_hash: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .field("password_hash", &(!self.password_hash.is_empty()))
            .finish()
    }
}

impl AdminConfig {
    /// The configured account, if both fields are set
    #[must_use]
    pub fn account(&self) -> Option<AdminAccount> {
        if self.email.trim().is_empty() || self.password_hash.trim().is_empty() {
            return None;
        }
        Some(AdminAccount {
            email: self.email.trim().to_string(),
            password_hash: self.password_hash.trim().to_string(),
        })
    }
}

/// `[contact]`
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Mail service id
    #[serde(default)]
    pub service_id: String,
    /// Template id
    #[serde(default)]
    pub template_id: String,
    /// Public API key
    #[serde(default)]
    pub api_key: String,
    /// HTTP endpoint, e.g. `https://api.emailjs.com/api/v1.0/email/send`;
    /// when unset, messages go to the outbox
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Outbox file; defaults to `~/.folio/outbox.jsonl`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbox: Option<PathBuf>,
}

impl std::fmt::Debug for ContactConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactConfig")
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("endpoint", &self.endpoint)
            .field("outbox", &self.outbox)
            .finish_non_exhaustive()
    }
}

impl ContactConfig {
    /// Effective outbox path
    #[must_use]
    pub fn outbox(&self) -> PathBuf {
        self.outbox.clone().unwrap_or_else(paths::outbox_file)
    }

    /// Settings passed to the mailer, with the env override applied
    #[must_use]
    pub fn settings(&self) -> ContactSettings {
        let api_key = std::env::var(MAIL_API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| self.api_key.clone());
        ContactSettings {
            service_id: self.service_id.clone(),
            template_id: self.template_id.clone(),
            api_key,
        }
    }
}

impl SiteConfig {
    /// Default config file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        paths::config_file()
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`, or the default location
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::default_path()),
        }
    }

    /// Save to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(io)
    }
}
