//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Legacy deployment variables: `<SERVICE>_PORT` and `DB_URL`
//! 2. Environment variables (prefix: `NEWSROOM_`, nested keys separated by `__`)
//! 3. Current working directory: ./config.toml
//! 4. XDG config directory: ~/.config/newsroom/{service_name}/config.toml
//! 5. System directory: /etc/newsroom/{service_name}/config.toml
//! 6. Default values
//!
//! Service-specific sections (for example the censor's `[censor]` table) are
//! read from the same layered sources through [`Config::figment`].

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable prefix for structured overrides
pub const ENV_PREFIX: &str = "NEWSROOM_";

/// Legacy variable holding the database connection string
pub const DB_URL_VAR: &str = "DB_URL";

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,

    /// Middleware configuration
    #[serde(default)]
    pub middleware: MiddlewareConfig,

    /// Database configuration (required by store-backed services)
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum idle connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_secs: u64,

    /// Maximum retry attempts for establishing database connection
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between retry attempts in seconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,
}

/// Middleware configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Maximum request body size in megabytes
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,

    /// CORS mode: permissive, restrictive or disabled
    #[serde(default = "default_cors_mode")]
    pub cors_mode: String,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            body_limit_mb: default_body_limit_mb(),
            cors_mode: default_cors_mode(),
        }
    }
}

impl DatabaseConfig {
    /// Pool acquire timeout
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_connection_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    5
}

fn default_retry_delay() -> u64 {
    2
}

fn default_body_limit_mb() -> usize {
    2
}

fn default_cors_mode() -> String {
    "permissive".to_string()
}

impl Config {
    /// Default configuration for a named service
    pub fn for_service(service_name: &str) -> Self {
        Self {
            service: ServiceConfig {
                name: service_name.to_string(),
                port: default_port(),
                log_level: default_log_level(),
                timeout_secs: default_timeout(),
            },
            middleware: MiddlewareConfig::default(),
            database: None,
        }
    }

    /// Load and validate configuration for a specific service name
    ///
    /// This is the entry point every service binary uses at startup.
    pub fn load_for_service(service_name: &str) -> Result<Self> {
        Self::from_figment(&Self::figment(service_name))
    }

    /// Extract and validate configuration from an already built figment
    ///
    /// Services with their own config sections build the figment once with
    /// [`Config::figment`] and extract both from it.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the layered figment for a service
    ///
    /// Exposed so services can extract their own sections with
    /// [`Figment::extract_inner`].
    pub fn figment(service_name: &str) -> Figment {
        let config_paths = Self::find_config_paths(service_name);

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Self::for_service(service_name)));

        // Lowest priority first so higher priority files override
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        let port_var = legacy_port_var(service_name);

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[port_var.as_str()])
                    .map(|_| "service.port".into()),
            )
            .merge(Env::raw().only(&[DB_URL_VAR]).map(|_| "database.url".into()))
    }

    /// Find all possible config file paths for a service
    ///
    /// Returns paths in priority order (highest first).
    fn find_config_paths(service_name: &str) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix("newsroom");
        if let Some(path) = xdg_dirs.find_config_file(Path::new(service_name).join("config.toml")) {
            paths.push(path);
        }

        paths.push(
            PathBuf::from("/etc/newsroom")
                .join(service_name)
                .join("config.toml"),
        );

        paths
    }

    /// Check invariants that serde defaults cannot express
    pub fn validate(&self) -> Result<()> {
        if self.service.name.is_empty() {
            return Err(Error::InvalidConfig(
                "service.name cannot be empty".to_string(),
            ));
        }

        if self.service.port == 0 {
            return Err(Error::InvalidConfig(
                "service.port must be greater than 0".to_string(),
            ));
        }

        if !VALID_LOG_LEVELS.contains(&self.service.log_level.as_str()) {
            return Err(Error::InvalidConfig(format!(
                "service.log_level must be one of: {}",
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        if let Some(ref db) = self.database {
            if db.url.is_empty() {
                return Err(Error::InvalidConfig(
                    "database.url cannot be empty".to_string(),
                ));
            }
            if db.max_connections == 0 || db.min_connections > db.max_connections {
                return Err(Error::InvalidConfig(format!(
                    "database pool bounds are invalid (min {}, max {})",
                    db.min_connections, db.max_connections
                )));
            }
        }

        Ok(())
    }

    /// Database section, failing when the service needs a store but none is configured
    pub fn require_database(&self) -> Result<&DatabaseConfig> {
        self.database.as_ref().ok_or_else(|| {
            Error::InvalidConfig(format!(
                "{} requires a database: set {} or [database].url",
                self.service.name, DB_URL_VAR
            ))
        })
    }

    /// Request timeout applied to every inbound request
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_secs)
    }
}

/// Name of the legacy port variable for a service, e.g. `NEWS_PORT`
pub fn legacy_port_var(service_name: &str) -> String {
    let stem = service_name
        .trim_start_matches("api-")
        .replace('-', "_")
        .to_uppercase();
    format!("{}_PORT", stem)
}
