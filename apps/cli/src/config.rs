//! CLI configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. The `--db` flag overrides the database path afterwards.
//!
//! | Variable                          | Default                           |
//! |-----------------------------------|-----------------------------------|
//! | `PARTNER_ORDERS_DB_PATH`          | platform data dir / `partner_orders.db` |
//! | `PARTNER_ORDERS_MAX_CONNECTIONS`  | `5`                               |
//! | `PARTNER_ORDERS_CURRENCY`         | `RUB`                             |

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "PARTNER_ORDERS_DB_PATH";
pub const ENV_MAX_CONNECTIONS: &str = "PARTNER_ORDERS_MAX_CONNECTIONS";
pub const ENV_CURRENCY: &str = "PARTNER_ORDERS_CURRENCY";

const DB_FILE_NAME: &str = "partner_orders.db";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub max_connections: u32,

    /// Currency code shown next to amounts (ISO 4217)
    pub currency_code: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match lookup(ENV_DB_PATH) {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_database_path()?,
        };

        let max_connections: u32 = lookup(ENV_MAX_CONNECTIONS)
            .unwrap_or_else(|| "5".to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(ENV_MAX_CONNECTIONS.to_string()))?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidValue(ENV_MAX_CONNECTIONS.to_string()));
        }

        let currency_code = lookup(ENV_CURRENCY)
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "RUB".to_string());

        Ok(AppConfig {
            database_path,
            max_connections,
            currency_code,
        })
    }

    /// Replaces the database path when `--db` was given.
    pub fn with_database_override(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.database_path = path;
        }
        self
    }
}

/// Database location inside the platform data directory.
///
/// - **Linux**: `~/.local/share/orders/partner_orders.db`
/// - **macOS**: `~/Library/Application Support/com.partner.orders/partner_orders.db`
pub fn default_database_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("com", "partner", "orders").ok_or(ConfigError::NoDataDir)?;
    Ok(dirs.data_dir().join(DB_FILE_NAME))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine the application data directory; set PARTNER_ORDERS_DB_PATH")]
    NoDataDir,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_values() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/tmp/orders.db"),
            (ENV_MAX_CONNECTIONS, "3"),
            (ENV_CURRENCY, "eur"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/orders.db"));
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.currency_code, "EUR");
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_DB_PATH, "/tmp/x.db")])).unwrap();
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.currency_code, "RUB");
    }

    #[test]
    fn test_invalid_connections() {
        let err = AppConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/tmp/x.db"),
            (ENV_MAX_CONNECTIONS, "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v) if v == ENV_MAX_CONNECTIONS));

        assert!(AppConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/tmp/x.db"),
            (ENV_MAX_CONNECTIONS, "0"),
        ]))
        .is_err());
    }

    #[test]
    fn test_override() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_DB_PATH, "/tmp/a.db")]))
            .unwrap()
            .with_database_override(Some(PathBuf::from("/tmp/b.db")));
        assert_eq!(config.database_path, PathBuf::from("/tmp/b.db"));
    }
}
