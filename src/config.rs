//! Configuration file structure
//!
//! A JSON file supplies database credentials, the API key hash and the
//! HTTP listener. When the file is absent, built-in defaults apply; those
//! defaults carry a placeholder hash, so the endpoint rejects every key
//! until a real hash is configured.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::{Limit, RequestDefaults};
use crate::http_server::HttpServerConfig;

/// Placeholder hash shipped in the defaults; it is not a valid digest
pub const PLACEHOLDER_KEY_HASH: &str = "SHA256_OF_APIKEY";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Database engine behind the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Engine {
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "sqlite")]
    Sqlite,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::MySql => "mysql",
            Engine::Sqlite => "sqlite",
        }
    }
}

/// Connection parameters
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_engine")]
    pub engine: Engine,

    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_port")]
    pub port: u16,

    #[serde(default = "default_db_user")]
    pub user: String,

    #[serde(default = "default_db_password")]
    pub password: String,

    /// Database name, or file path for SQLite
    #[serde(default = "default_db_name")]
    pub name: String,

    #[serde(default = "default_db_charset")]
    pub charset: String,
}

fn default_engine() -> Engine {
    Engine::MySql
}
fn default_db_host() -> String {
    "localhost".to_string()
}
fn default_db_port() -> u16 {
    3306
}
fn default_db_user() -> String {
    "user".to_string()
}
fn default_db_password() -> String {
    "password".to_string()
}
fn default_db_name() -> String {
    "database_name".to_string()
}
fn default_db_charset() -> String {
    "utf8mb4".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            host: default_db_host(),
            port: default_db_port(),
            user: default_db_user(),
            password: default_db_password(),
            name: default_db_name(),
            charset: default_db_charset(),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("engine", &self.engine)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("charset", &self.charset)
            .finish()
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    /// SHA-256 hex digest of the API key
    #[serde(default = "default_api_key_hash")]
    pub api_key_sha256: String,

    /// Table used when a request names none
    #[serde(default = "default_table")]
    pub default_table: String,

    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_api_key_hash() -> String {
    PLACEHOLDER_KEY_HASH.to_string()
}
fn default_table() -> String {
    crate::export::registry::DEFAULT_TABLE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            api_key_sha256: default_api_key_hash(),
            default_table: default_table(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.name.trim().is_empty() {
            return Err(ConfigError::Invalid("database.name must not be empty".to_string()));
        }
        if self.database.engine == Engine::MySql && self.database.charset.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "database.charset must not be empty".to_string(),
            ));
        }
        if self.default_table.trim().is_empty() {
            return Err(ConfigError::Invalid("default_table must not be empty".to_string()));
        }
        if self.http.port == 0 {
            return Err(ConfigError::Invalid("http.port must be > 0".to_string()));
        }
        Ok(())
    }

    /// Arguments applied to requests that omit them
    pub fn request_defaults(&self) -> RequestDefaults {
        RequestDefaults {
            table: self.default_table.clone(),
            limit: Limit::default(),
        }
    }
}
