use std::{env, net::SocketAddr, path::PathBuf};

use anyhow::{Context, Result};

/// Runtime configuration, read from environment variables with local
/// development defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub model_path: PathBuf,
    pub artifacts_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bind_addr = env::var("AIRAWARE_BIND")
            .unwrap_or_else(|_| "127.0.0.1:8000".into())
            .parse()
            .context("invalid AIRAWARE_BIND address")?;

        Ok(Self {
            bind_addr,
            db_path: path_var("AIRAWARE_DB", "airaware.sqlite3"),
            model_path: path_var("AIRAWARE_MODEL", "models/best_pm25_model.json"),
            artifacts_dir: path_var("AIRAWARE_ARTIFACTS_DIR", "artifacts"),
            data_dir: path_var("AIRAWARE_DATA_DIR", "data/cleaned"),
        })
    }
}

fn path_var(name: &str, default: &str) -> PathBuf {
    env::var(name)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
