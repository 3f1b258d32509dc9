mod config;
mod database;
mod error;
mod logging;
mod server;
mod services;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::AppConfig;
use crate::server::AppState;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "campusd",
    version,
    about = "Academic records backend: JSON API and front-end host"
)]
pub struct Cli {
    /// Address to listen on (e.g. 127.0.0.1:3000)
    #[arg(long)]
    bind: Option<String>,

    /// SQLite database file
    #[arg(long)]
    database: Option<PathBuf>,

    /// Directory with the built front end
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not insert the starter dataset into an empty store
    #[arg(long, action = ArgAction::SetTrue)]
    no_seed: bool,

    /// Log level or filter directive (error,warn,info,debug,trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let log_level = config::resolve_log_level(&cli, |key| std::env::var(key).ok());
    logging::init_logging(&log_level, cli.log_json)?;

    let cfg = AppConfig::from_cli(&cli)?;
    info!(?cfg, "app config");

    let db = database::open_store(&cfg.database, cfg.max_connections).await?;

    if cfg.seed {
        let outcome = database::seed_if_empty(&db)
            .await
            .context("Failed to seed database")?;
        info!(?outcome, "seed check finished");
    }

    let listener = TcpListener::bind(&cfg.bind)
        .await
        .with_context(|| format!("bind {}", cfg.bind))?;

    let state = AppState {
        db: db.clone(),
        static_dir: cfg.static_dir.clone(),
    };
    server::serve(listener, state).await?;

    db.close().await.context("close database")?;
    info!("bye");
    Ok(())
}
