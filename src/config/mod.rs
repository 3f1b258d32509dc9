use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_DATABASE: &str = "./data/campus.sqlite";
pub const DEFAULT_STATIC_DIR: &str = "./public";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Socket address the HTTP server listens on.
    pub bind: String,
    /// SQLite database file. Created on first start.
    pub database: PathBuf,
    /// Directory holding the built front end (`index.html` and assets).
    pub static_dir: PathBuf,
    pub max_connections: u32,
    /// Populate the starter dataset when the store is empty.
    pub seed: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            database: PathBuf::from(DEFAULT_DATABASE),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            seed: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
        }
    }
}

/// Settings read from a TOML config file. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    pub bind: Option<String>,
    pub database: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
    pub max_connections: Option<u32>,
    pub seed: Option<bool>,
}

impl AppConfig {
    pub fn from_cli(cli: &crate::Cli) -> Result<Self> {
        let file_cfg = load_file_config(cli.config.as_deref())?;
        Ok(Self::resolve(cli, file_cfg, |key| std::env::var(key).ok()))
    }

    /// Merges settings. Priority: CLI args -> env vars -> config file -> defaults.
    pub fn resolve<F>(cli: &crate::Cli, file_cfg: FileConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind = cli
            .bind
            .clone()
            .or_else(|| env("CAMPUS_BIND"))
            .or(file_cfg.bind)
            .unwrap_or(defaults.bind);
        let database = cli
            .database
            .clone()
            .or_else(|| env("CAMPUS_DATABASE").map(PathBuf::from))
            .or(file_cfg.database)
            .unwrap_or(defaults.database);
        let static_dir = cli
            .static_dir
            .clone()
            .or_else(|| env("CAMPUS_STATIC_DIR").map(PathBuf::from))
            .or(file_cfg.static_dir)
            .unwrap_or(defaults.static_dir);
        Self {
            bind,
            database,
            static_dir,
            max_connections: file_cfg
                .max_connections
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_connections),
            seed: !cli.no_seed && file_cfg.seed.unwrap_or(defaults.seed),
            log_level: resolve_log_level(cli, &env),
            log_json: cli.log_json,
        }
    }
}

/// Log level from CLI or environment. Resolved before any config file is read
/// so that loading the file is itself logged.
pub fn resolve_log_level<F>(cli: &crate::Cli, env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    cli.log_level
        .clone()
        .or_else(|| env("CAMPUS_LOG"))
        .or_else(|| env("RUST_LOG"))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(p) = explicit {
        return vec![p.to_path_buf()];
    }
    let mut v = Vec::new();
    if let Ok(p) = std::env::var("CAMPUS_CONFIG") {
        v.push(PathBuf::from(p));
    }
    if let Some(dir) = dirs::config_dir() {
        v.push(dir.join("campus-records").join("config.toml"));
    }
    v.push(PathBuf::from("campus.toml"));
    v
}

/// Loads the first config file that exists.
///
/// An explicitly given path that does not exist is an error; a file that
/// fails to parse is logged and skipped.
pub fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(p) = explicit
        && !p.exists()
    {
        anyhow::bail!("config file not found: {}", p.display());
    }

    for p in candidate_paths(explicit) {
        if p.exists() {
            return parse_config_file(&p);
        }
    }
    Ok(FileConfig::default())
}

pub fn parse_config_file(path: &Path) -> Result<FileConfig> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    match toml::from_str::<FileConfig>(&s) {
        Ok(cfg) => {
            info!(path=%path.display(), "loaded config file");
            Ok(cfg)
        }
        Err(e) => {
            warn!(path=%path.display(), error=%e.to_string(), "parse config failed");
            Ok(FileConfig::default())
        }
    }
}
