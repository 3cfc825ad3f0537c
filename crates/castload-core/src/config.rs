use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::locator::DEFAULT_IPFS_GATEWAY;

/// Global configuration loaded from `~/.config/castload/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastloadConfig {
    /// Base URL that `ipfs:/` and `fs:/` locators are rewritten onto.
    pub ipfs_gateway: String,
    /// Optional connect timeout in seconds (None = wait indefinitely).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Optional cap on HTML pages followed via discovery links (None = unbounded).
    #[serde(default)]
    pub max_html_hops: Option<u32>,
    /// Optional User-Agent for HTTP requests (None = libcurl default).
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for CastloadConfig {
    fn default() -> Self {
        Self {
            ipfs_gateway: DEFAULT_IPFS_GATEWAY.to_string(),
            connect_timeout_secs: None,
            max_html_hops: None,
            user_agent: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("castload")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CastloadConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CastloadConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CastloadConfig = toml::from_str(&data)?;
    Ok(cfg)
}
