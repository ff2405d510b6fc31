//! Configuration schema for Armada
//!
//! Configuration is stored at `~/.config/armada/config.toml`. Every field
//! has a default, so a missing file or a partial document is fine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Parse-cache settings
    pub cache: CacheConfig,

    /// Reachability probe settings
    pub probe: ProbeConfig,
}

/// Parse-cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether resolutions go through the cache at all
    pub enabled: bool,

    /// Override the cache root (defaults to ~/.armada/cache)
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

/// Reachability probe settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// TCP connect timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}
