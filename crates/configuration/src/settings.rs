use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub api: ApiSettings,
    pub logging: LoggingSettings,
}

/// Where the HTTP server binds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// `0.0.0.0` for external access, `127.0.0.1` for local only.
    pub host: String,
    pub port: u16,
}

/// Location of the SQLite trade ledger.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: PathBuf,
    pub max_connections: u32,
}

/// Settings for the HTTP API and the KPI engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Currency label attached to every result (e.g. "USD").
    pub base_currency: String,
    /// Required `x-api-key` value. When unset, every `/api/` request is refused.
    pub api_key: Option<String>,
    pub cors_origins: Vec<String>,
    pub default_trades_limit: usize,
    pub max_trades_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/data.db"),
            max_connections: 5,
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_currency: "USD".to_string(),
            api_key: None,
            cors_origins: Vec::new(),
            default_trades_limit: 100,
            max_trades_limit: 1000,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::ValidationError(format!("server.host '{}' is not an IP address", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Settings {
    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.socket_addr()?;
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".to_string(),
            ));
        }
        if self.api.base_currency.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.base_currency must not be empty".to_string(),
            ));
        }
        if self.api.default_trades_limit == 0
            || self.api.default_trades_limit > self.api.max_trades_limit
        {
            return Err(ConfigError::ValidationError(format!(
                "api.default_trades_limit ({}) must be between 1 and api.max_trades_limit ({})",
                self.api.default_trades_limit, self.api.max_trades_limit
            )));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
