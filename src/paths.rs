//! Common paths for Postboard data storage
//!
//! Everything lives under ~/.config/postboard/ on all platforms:
//! - config.toml - User configuration
//! - media/ - Images imported into posts

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the Postboard data directory (~/.config/postboard/)
pub fn postboard_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(".config").join("postboard");
    fs::create_dir_all(&dir).context("Failed to create postboard directory")?;
    Ok(dir)
}

/// Get the config file path (~/.config/postboard/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(postboard_dir()?.join("config.toml"))
}

/// Get the default media directory (~/.config/postboard/media/)
pub fn media_dir() -> Result<PathBuf> {
    Ok(postboard_dir()?.join("media"))
}
