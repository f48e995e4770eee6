//! HTTP server command
//!
//! Runs migrations, then serves the patient/doctor/appointment API.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::Parser;

use hospitalctl_server::db::{create_pool, migrations};
use hospitalctl_server::{run_server, ServerConfig};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "HOSPITALCTL_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// IANA timezone whose calendar date counts as "today" in stats
    #[arg(long, env = "HOSPITALCTL_TIMEZONE", default_value = "UTC")]
    pub timezone: Tz,

    /// Start without running schema migrations
    #[arg(long)]
    pub skip_migrations: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_config = args.database.to_config()?;

    tracing::info!("Starting hospitalctl server on {}", args.bind);

    let pool = create_pool(&db_config)
        .await
        .context("Failed to create database pool")?;

    if args.skip_migrations {
        tracing::warn!("Skipping migrations");
    } else {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        timezone: args.timezone,
    };

    // Run server (blocks until shutdown)
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
