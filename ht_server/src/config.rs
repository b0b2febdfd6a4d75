//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use holdem_table::{
    DEFAULT_MAX_PLAYERS,
    entities::{Money, TableId},
    table::TableConfig,
};
use std::net::{Ipv4Addr, SocketAddr};

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Table defaults configuration
    pub table_defaults: TableDefaultsConfig,
    /// Number of tables to create on startup
    pub num_tables: usize,
}

/// Default table configuration
#[derive(Debug, Clone)]
pub struct TableDefaultsConfig {
    /// Seats per table
    pub max_players: usize,
    /// Stake level; blinds derive from it
    pub limit: Money,
    /// Chips each player sits down with (default: one limit)
    pub buy_in: Option<Money>,
}

impl Default for TableDefaultsConfig {
    fn default() -> Self {
        Self {
            max_players: DEFAULT_MAX_PLAYERS,
            limit: Money::from_dollars(2),
            buy_in: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `num_tables_override` - Optional number of tables override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a money amount can't be parsed
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        num_tables_override: Option<usize>,
    ) -> Result<Self, ConfigError> {
        // Bind address
        let bind = bind_override
            .or_else(|| {
                std::env::var("SERVER_BIND")
                    .ok()
                    .and_then(|s| s.parse().ok())
            })
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::LOCALHOST, 6969)));

        let defaults = TableDefaultsConfig::default();
        let table_defaults = TableDefaultsConfig {
            max_players: parse_env_or("TABLE_MAX_PLAYERS", defaults.max_players),
            limit: parse_money_env("TABLE_LIMIT")?.unwrap_or(defaults.limit),
            buy_in: parse_money_env("TABLE_BUY_IN")?,
        };

        // Number of tables
        let num_tables = num_tables_override.unwrap_or_else(|| parse_env_or("MAX_TABLES", 1));

        Ok(ServerConfig {
            bind,
            table_defaults,
            num_tables,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_tables == 0 {
            return Err(ConfigError::Invalid {
                var: "MAX_TABLES".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        self.table_config(1)
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "TABLE_*".to_string(),
                reason,
            })
    }

    /// Configuration for the table with this ID
    pub fn table_config(&self, table_id: TableId) -> TableConfig {
        TableConfig {
            name: format!("Table {table_id}"),
            max_players: self.table_defaults.max_players,
            limit: self.table_defaults.limit,
            buy_in: self.table_defaults.buy_in,
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Money amounts are rejected rather than silently defaulted
fn parse_money_env(key: &str) -> Result<Option<Money>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|e: holdem_table::entities::ParseMoneyError| ConfigError::Invalid {
                var: key.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
