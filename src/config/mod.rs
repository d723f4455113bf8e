//! Configuration for the Lattes API server
//!
//! Handles the HTTP bind address and the relational store connection.

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

/// Relational store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL (e.g., "sqlite://data/lattes.db" or "sqlite::memory:")
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Single-connection in-memory store, used by tests and local demos
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    /// Whether the URL points at a transient in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("LATTES_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("LATTES_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
            },
            database: DatabaseConfig {
                url: std::env::var("LATTES_DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://data/lattes.db".to_string()),
                max_connections: std::env::var("LATTES_DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|raw| raw.parse().ok())
                    .unwrap_or(5),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_database_is_detected() {
        assert!(DatabaseConfig::in_memory().is_in_memory());
        let file = DatabaseConfig {
            url: "sqlite://data/lattes.db".to_string(),
            max_connections: 5,
        };
        assert!(!file.is_in_memory());
    }
}
