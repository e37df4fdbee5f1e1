/// Configuration management for the web server
///
/// Loads configuration from environment variables into a type-safe struct.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `HTTP_HOST`: host to bind to (default: 0.0.0.0)
/// - `HTTP_PORT`: port to bind to (default: 8080)
/// - `SESSION_TTL_HOURS`: login session lifetime (default: 336 = 14 days)
/// - `RUST_LOG`: log filter (default: info)
use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub http: HttpConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session configuration
    pub session: SessionConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long a login session stays valid, in hours
    pub ttl_hours: i64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a variable has an
    /// invalid value
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let ttl_hours = env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "336".to_string())
            .parse::<i64>()?;

        if ttl_hours <= 0 {
            anyhow::bail!("SESSION_TTL_HOURS must be positive");
        }

        Ok(Self {
            http: HttpConfig { host, port },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            session: SessionConfig { ttl_hours },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http.host, self.http.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = Config {
            http: HttpConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                max_connections: 10,
            },
            session: SessionConfig { ttl_hours: 336 },
        };

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
