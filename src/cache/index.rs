//! Cache index persistence and lookup

use crate::cache::naming;
use crate::error::{ArmadaError, ArmadaResult};
use crate::inventory::Instances;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Resolves where the cache lives on disk.
///
/// Passed explicitly into the resolver so tests can redirect the cache root
/// to a temporary directory instead of touching `~/.armada/cache`.
#[derive(Debug, Clone)]
pub struct CacheLocator {
    cache_dir: PathBuf,
}

impl CacheLocator {
    /// Default cache root: `$ARMADA_CACHE_DIR`, else `~/.armada/cache`
    pub fn new() -> Self {
        let cache_dir = std::env::var_os("ARMADA_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".armada")
                    .join("cache")
            });

        Self { cache_dir }
    }

    /// Use an explicit cache root
    pub fn with_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// The cache root directory
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path of the persisted index document
    pub fn index_path(&self) -> PathBuf {
        self.cache_dir.join(naming::INDEX_FILE_NAME)
    }

    /// A freshly named artifact path for an inventory file
    pub fn artifact_path(&self, config_path: &Path) -> PathBuf {
        self.cache_dir.join(naming::artifact_file_name(config_path))
    }

    /// Create the cache root if absent
    pub async fn ensure_dir(&self) -> ArmadaResult<()> {
        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| ArmadaError::io(format!("creating cache dir {}", self.cache_dir.display()), e))
    }
}

impl Default for CacheLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// One cached inventory: where its artifact lives and the mtime it was
/// captured at
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cache {
    /// Absolute path of the source inventory file (the lookup key)
    pub config_path: PathBuf,

    /// Path of the serialized instance sequence for this inventory
    pub instances_path: PathBuf,

    /// Unix mtime of the inventory file when this entry was last refreshed
    pub mod_time: i64,

    /// In-memory instances; never persisted with the index
    #[serde(skip)]
    pub instances: Instances,
}

/// The persisted mapping from inventory path to cache entry.
///
/// Insertion-ordered, at most one entry per distinct path. A passive
/// container: all mutation policy lives in the resolver.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheIndex {
    entries: Vec<Cache>,
}

impl CacheIndex {
    /// Linear scan for the entry keyed by `config_path`
    pub fn get_by_config_path(&self, config_path: &Path) -> Option<&Cache> {
        self.entries.iter().find(|c| c.config_path == config_path)
    }

    /// Mutable variant used for in-place refresh
    pub fn get_mut_by_config_path(&mut self, config_path: &Path) -> Option<&mut Cache> {
        self.entries
            .iter_mut()
            .find(|c| c.config_path == config_path)
    }

    /// Append a new entry; the caller guarantees the path is not present
    pub fn push(&mut self, entry: Cache) {
        self.entries.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cache> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the index document; a missing file is an empty index
    pub async fn load(path: &Path) -> ArmadaResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ArmadaError::io(format!("reading cache index {}", path.display()), e))?;

        let index: CacheIndex = serde_json::from_str(&content)?;
        Ok(index)
    }

    /// Rewrite the whole index document.
    ///
    /// Writes a sibling temp file and renames it into place so a reader in
    /// this process never observes a partial document.
    pub async fn save(&self, path: &Path) -> ArmadaResult<()> {
        let content = serde_json::to_string_pretty(self)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .await
            .map_err(|e| ArmadaError::io(format!("writing cache index {}", tmp.display()), e))?;

        fs::rename(&tmp, path)
            .await
            .map_err(|e| ArmadaError::io(format!("replacing cache index {}", path.display()), e))
    }
}
