//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use hospitalctl_server::db::{create_pool, migrations};

use super::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Create tables and indexes, then exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let db_config = args.database.to_config()?;
    let pool = create_pool(&db_config)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    Ok(())
}
