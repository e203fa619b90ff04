/// Configuration management for the API server
///
/// Configuration comes from environment variables; a `.env` file in the working
/// directory is loaded first when present.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `PORT`: Port to bind to (default: 5000)
/// - `STORE_BACKEND`: `postgres` or `memory` (default: postgres)
/// - `DATABASE_URL`: PostgreSQL connection string (required for postgres)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `RUN_MIGRATIONS`: Apply migrations on startup (default: true)
/// - `JWT_SECRET`: Token signing secret, at least 32 characters (required)
/// - `EXPIRES_IN`: Token lifetime, e.g. `1h`, `7d`, or seconds (default: 1h, at most 10 years).
///   A bare number means seconds; an `expiresIn`-style value given in
///   milliseconds must be converted before use.
/// - `CORS_ORIGINS`: Comma-separated origins, `*` for any (default: *)
/// - `REQUIRE_AUTH_FOR_WRITES`: Require a bearer token on resource writes (default: false)
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use folio_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub store: StoreConfig,
    pub jwt: JwtConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `["*"]` means permissive
    pub cors_origins: Vec<String>,

    /// Guard POST/PUT/DELETE resource routes with bearer tokens
    pub require_auth_for_writes: bool,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => anyhow::bail!("unknown STORE_BACKEND '{}' (expected postgres or memory)", other),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,

    /// PostgreSQL connection URL (unused by the memory backend)
    pub database_url: Option<String>,

    pub max_connections: u32,

    pub run_migrations: bool,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for token signing
    ///
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,

    /// Lifetime of issued tokens
    pub expires_in: Duration,
}

/// Longest accepted token lifetime
pub const MAX_EXPIRY: Duration = Duration::from_secs(10 * 365 * 86_400);

/// Parses a token lifetime: bare seconds (`3600`) or a humantime string (`1h`, `7d`).
///
/// Bare numbers are seconds, not milliseconds.
pub fn parse_expiry(raw: &str) -> anyhow::Result<Duration> {
    let raw = raw.trim();
    let duration = match raw.parse::<u64>() {
        Ok(secs) => Duration::from_secs(secs),
        Err(_) => humantime::parse_duration(raw)
            .map_err(|e| anyhow::anyhow!("invalid EXPIRES_IN '{}': {}", raw, e))?,
    };

    if duration.is_zero() {
        anyhow::bail!("EXPIRES_IN must be greater than zero");
    }
    if duration > MAX_EXPIRY {
        anyhow::bail!("EXPIRES_IN must be at most 10 years, got '{}'", raw);
    }
    Ok(duration)
}

fn parse_bool(name: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{} must be a boolean, got '{}'", name, other),
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = var_or("API_HOST", "0.0.0.0");
        let port = var_or("PORT", "5000").parse::<u16>()?;

        let cors_origins = var_or("CORS_ORIGINS", "*")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let require_auth_for_writes =
            parse_bool("REQUIRE_AUTH_FOR_WRITES", &var_or("REQUIRE_AUTH_FOR_WRITES", "false"))?;

        let backend: StoreBackend = var_or("STORE_BACKEND", "postgres").parse()?;
        let database_url = env::var("DATABASE_URL").ok();
        if backend == StoreBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL environment variable is required");
        }

        let max_connections = var_or("DATABASE_MAX_CONNECTIONS", "10").parse::<u32>()?;
        let run_migrations = parse_bool("RUN_MIGRATIONS", &var_or("RUN_MIGRATIONS", "true"))?;

        let secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let expires_in = parse_expiry(&var_or("EXPIRES_IN", "1h"))?;

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                require_auth_for_writes,
            },
            store: StoreConfig {
                backend,
                database_url,
                max_connections,
                run_migrations,
            },
            jwt: JwtConfig { secret, expires_in },
        })
    }

    /// Configuration for tests and local experiments: memory store, fixed secret
    pub fn for_memory(secret: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
                require_auth_for_writes: false,
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                database_url: None,
                max_connections: 1,
                run_migrations: false,
            },
            jwt: JwtConfig {
                secret: secret.into(),
                expires_in: Duration::from_secs(3600),
            },
        }
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let mut config = Config::for_memory("test-secret-key-at-least-32-bytes-long");
        config.api.port = 5000;

        assert_eq!(config.bind_address(), "127.0.0.1:5000");
    }

    #[test]
    fn test_parse_expiry() {
        assert_eq!(parse_expiry("3600").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_expiry("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_expiry("7d").unwrap(), Duration::from_secs(7 * 86_400));
        assert_eq!(parse_expiry(" 30m ").unwrap(), Duration::from_secs(1800));
        assert!(parse_expiry("soon").is_err());
        assert!(parse_expiry("0").is_err());
    }

    #[test]
    fn test_parse_expiry_upper_bound() {
        assert_eq!(parse_expiry("3650d").unwrap(), MAX_EXPIRY);
        assert!(parse_expiry("3651d").is_err());
        assert!(parse_expiry("1000000y").is_err());
        assert!(parse_expiry(&u64::MAX.to_string()).is_err());
    }

    #[test]
    fn test_store_backend_from_str() {
        assert_eq!("postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert_eq!("Memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("mongo".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(!parse_bool("X", "0").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }
}
