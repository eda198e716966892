/// Configuration management for the seatwell backend
///
/// Handles server configuration, database location, and runtime parameters.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Directory holding the SQLite database file (default: "data")
    pub data_dir: String,
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("SEATWELL_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("SEATWELL_PORT")
                    .unwrap_or_else(|_| "3004".to_string())
                    .parse()
                    .unwrap_or(3004),
            },
            database: DatabaseConfig {
                data_dir: std::env::var("SEATWELL_DATA_DIR")
                    .unwrap_or_else(|_| "data".to_string()),
            },
        }
    }
}
