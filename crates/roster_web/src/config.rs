//! Environment-driven server configuration.
//!
//! Every setting has a default, so an empty environment yields a usable
//! local configuration. Parsing is done over a lookup function so tests never
//! touch the process environment.

use roster_core::{default_log_level, DatabaseLocation, LogTarget};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const DATABASE_ENV: &str = "ROSTER_DATABASE";
pub const BIND_ADDR_ENV: &str = "ROSTER_BIND_ADDR";
pub const LOG_LEVEL_ENV: &str = "ROSTER_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "ROSTER_LOG_DIR";

pub const DEFAULT_DATABASE: &str = "roster.sqlite3";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug)]
pub enum ConfigError {
    InvalidBindAddr { value: String, reason: String },
    InvalidLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBindAddr { value, reason } => {
                write!(f, "invalid {BIND_ADDR_ENV} `{value}`: {reason}")
            }
            Self::InvalidLogDir(reason) => write!(f, "invalid {LOG_DIR_ENV}: {reason}"),
        }
    }
}

impl Error for ConfigError {}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address.
    pub bind_addr: SocketAddr,
    /// Storage backend selected by the connection setting.
    pub database: DatabaseLocation,
    pub log_level: String,
    pub log_target: LogTarget,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            database: DatabaseLocation::parse(DEFAULT_DATABASE),
            log_level: default_log_level().to_string(),
            log_target: LogTarget::Stderr,
        }
    }
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_value = read(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .trim()
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                reason: err.to_string(),
            })?;

        let database = DatabaseLocation::parse(
            read(DATABASE_ENV)
                .as_deref()
                .unwrap_or(DEFAULT_DATABASE),
        );

        let log_level = read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string());
        let log_target = LogTarget::from_setting(read(LOG_DIR_ENV).as_deref())
            .map_err(ConfigError::InvalidLogDir)?;

        Ok(Self {
            bind_addr,
            database,
            log_level,
            log_target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_local_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(
            config.database,
            DatabaseLocation::File(PathBuf::from(DEFAULT_DATABASE))
        );
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn database_setting_selects_backend() {
        let config = config_from(&[(DATABASE_ENV, "/var/lib/roster/prod.sqlite3")]).unwrap();
        assert_eq!(
            config.database,
            DatabaseLocation::File(PathBuf::from("/var/lib/roster/prod.sqlite3"))
        );

        let config = config_from(&[(DATABASE_ENV, ":memory:")]).unwrap();
        assert_eq!(config.database, DatabaseLocation::InMemory);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[(DATABASE_ENV, "  "), (BIND_ADDR_ENV, "")]).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let err = config_from(&[(BIND_ADDR_ENV, "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
        assert!(err.to_string().contains("localhost"));
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let err = config_from(&[(LOG_DIR_ENV, "logs")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogDir(_)));
    }
}
