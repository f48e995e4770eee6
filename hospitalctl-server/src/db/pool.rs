//! Connection provider
//!
//! Uses sqlx PgPool with explicit connection limits. Handlers take one
//! pooled connection per request via [`acquire`]; the returned guard puts
//! the handle back into the pool when dropped, on every exit path.

use std::str::FromStr;
use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgConnection, PgPool, Postgres};

use super::DbError;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a free connection.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default per-statement timeout enforced by Postgres.
pub const DEFAULT_STATEMENT_TIMEOUT: Duration = Duration::from_secs(30);

/// A connection checked out for the duration of one request.
pub type Conn = PoolConnection<Postgres>;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// How long `acquire` waits before failing with a connection error
    pub acquire_timeout: Duration,
    /// Session `statement_timeout`; `None` leaves the server default
    pub statement_timeout: Option<Duration>,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            statement_timeout: Some(DEFAULT_STATEMENT_TIMEOUT),
        }
    }

    fn connect_options(&self) -> Result<PgConnectOptions, DbError> {
        let mut options = PgConnectOptions::from_str(&self.url).map_err(DbError::Connection)?;
        if let Some(timeout) = self.statement_timeout {
            options = options.options([("statement_timeout", format!("{}ms", timeout.as_millis()))]);
        }
        Ok(options)
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Create a PostgreSQL connection pool, connecting eagerly.
///
/// # Errors
///
/// Returns [`DbError::Connection`] if the URL is invalid or the store is
/// unreachable.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DatabaseConfig::new("postgres://localhost/hospital")).await?;
/// ```
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let options = config.connect_options()?;
    config
        .pool_options()
        .connect_with(options)
        .await
        .map_err(DbError::Connection)
}

/// Create a pool that connects on first use.
///
/// Startup succeeds even when the store is down; each request then
/// surfaces the outage as a connection error.
pub fn create_lazy_pool(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let options = config.connect_options()?;
    Ok(config.pool_options().connect_lazy_with(options))
}

/// Check out one connection for the current request.
pub async fn acquire(pool: &PgPool) -> Result<Conn, DbError> {
    pool.acquire().await.map_err(|e| {
        tracing::warn!(error = %e, "failed to acquire database connection");
        DbError::Connection(e)
    })
}

/// Round-trip a trivial statement to prove the connection is usable.
pub async fn ping(conn: &mut PgConnection) -> Result<(), DbError> {
    let (one,): (i32,) = sqlx::query_as("SELECT 1").fetch_one(conn).await?;
    debug_assert_eq!(one, 1);
    Ok(())
}
