use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ingest::ImportLayout;

pub const DEFAULT_DATABASE: &str = "lots.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8089;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LotkeeperConfig {
    pub database: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub layout: Option<ImportLayout>,
}

impl LotkeeperConfig {
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(self.database.as_deref().unwrap_or(DEFAULT_DATABASE))
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn layout(&self) -> ImportLayout {
        self.layout.unwrap_or_default()
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("lotkeeper.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<LotkeeperConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: LotkeeperConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
