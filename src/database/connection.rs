use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::database::migration::run_migrations;

/// Connects to the SQLite database, creating the file if it does not exist.
///
/// # Arguments
/// * `db_path` - Path to the SQLite database file.
/// * `max_connections` - Upper bound of the connection pool.
///
/// # Returns
/// * `Result<DatabaseConnection, DbErr>` - The database connection or an error.
pub async fn connect_database(
    db_path: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    info!("Connecting to SQLite database at: {}", db_path);

    let mut opt = ConnectOptions::new(format!("sqlite://{}?mode=rwc", db_path)); // mode=rwc: read, write, create
    opt.max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(true)
        .sqlx_logging_level(tracing::log::LevelFilter::Debug);

    Database::connect(opt).await
}

/// Opens the record store and brings its schema up to date.
///
/// Any failure here is fatal for the process: the server must not start on a
/// store whose schema could not be created.
pub async fn open_store(db_path: &Path, max_connections: u32) -> Result<DatabaseConnection> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("create database directory: {}", parent.display()))?;
    }

    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    let db = connect_database(path_str, max_connections)
        .await
        .context("Failed to connect to database")?;

    run_migrations(&db)
        .await
        .context("Failed to create database schema")?;
    info!("Database schema is up to date");

    Ok(db)
}
