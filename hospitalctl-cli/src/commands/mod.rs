//! Command implementations for hospitalctl CLI

pub mod migrate;
pub mod serve;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use hospitalctl_server::db::pool::{DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS, DEFAULT_STATEMENT_TIMEOUT};
use hospitalctl_server::DatabaseConfig;

pub use migrate::run_migrate;
pub use serve::run_serve;

/// Database connection flags shared by every command that touches the store
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database URL (overrides environment / .env)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "HOSPITALCTL_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Seconds to wait for a free connection before failing the request
    #[arg(long, env = "HOSPITALCTL_ACQUIRE_TIMEOUT", default_value_t = DEFAULT_ACQUIRE_TIMEOUT.as_secs())]
    pub acquire_timeout: u64,

    /// Per-statement timeout in seconds (0 disables)
    #[arg(long, env = "HOSPITALCTL_STATEMENT_TIMEOUT", default_value_t = DEFAULT_STATEMENT_TIMEOUT.as_secs())]
    pub statement_timeout: u64,
}

impl DatabaseArgs {
    /// Build the explicit database configuration handed to the pool.
    pub fn to_config(&self) -> Result<DatabaseConfig> {
        let url = self
            .database_url
            .clone()
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

        let mut config = DatabaseConfig::new(url);
        config.max_connections = self.max_connections;
        config.acquire_timeout = Duration::from_secs(self.acquire_timeout);
        config.statement_timeout =
            (self.statement_timeout > 0).then(|| Duration::from_secs(self.statement_timeout));
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(url: Option<&str>, statement_timeout: u64) -> DatabaseArgs {
        DatabaseArgs {
            database_url: url.map(str::to_owned),
            max_connections: 3,
            acquire_timeout: 2,
            statement_timeout,
        }
    }

    #[test]
    fn missing_url_is_reported() {
        let err = args(None, 30).to_config().unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL not set"));
    }

    #[test]
    fn zero_statement_timeout_disables_it() {
        let config = args(Some("postgres://localhost/hospital"), 0).to_config().unwrap();
        assert_eq!(config.statement_timeout, None);
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.acquire_timeout, Duration::from_secs(2));
    }
}
