//! Cache-validity decision engine
//!
//! Decides, per resolution, whether a previously parsed inventory can be
//! reused or must be re-parsed, and keeps the on-disk index consistent
//! across invocations. Cache-side failures are never fatal: an unreadable
//! index, a missing artifact, or a failed write all degrade to a fresh
//! parse of the inventory itself.

use crate::cache::index::{Cache, CacheIndex, CacheLocator};
use crate::error::{ArmadaError, ArmadaResult};
use crate::inventory::{Instances, InventoryParser};
use std::path::Path;
use std::time::UNIX_EPOCH;
use tokio::fs;
use tracing::{debug, warn};

/// Unix mtime of a file, in seconds
pub async fn file_mod_time(path: &Path) -> ArmadaResult<i64> {
    let meta = fs::metadata(path)
        .await
        .map_err(|e| ArmadaError::io(format!("getting status of {}", path.display()), e))?;

    let modified = meta
        .modified()
        .map_err(|e| ArmadaError::io(format!("reading mtime of {}", path.display()), e))?;

    Ok(modified
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0))
}

/// Load a serialized instance sequence from a cache artifact
pub async fn load_artifact(path: &Path) -> ArmadaResult<Instances> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| ArmadaError::io(format!("reading cache artifact {}", path.display()), e))?;

    let instances: Instances = serde_json::from_str(&content)?;
    Ok(instances)
}

/// Resolves inventories through the cache.
///
/// Holds the explicit cache location and the parser collaborator; the index
/// is loaded from disk at most once, on the first cached resolution.
pub struct Resolver<P> {
    locator: CacheLocator,
    parser: P,
    index: Option<CacheIndex>,
}

impl<P: InventoryParser> Resolver<P> {
    pub fn new(locator: CacheLocator, parser: P) -> Self {
        Self {
            locator,
            parser,
            index: None,
        }
    }

    pub fn locator(&self) -> &CacheLocator {
        &self.locator
    }

    /// Produce the instance sequence for an inventory file.
    ///
    /// `config_path` is expected to be absolute. With `use_cache` false the
    /// index is neither read nor written. Parse failures and an unreadable
    /// inventory are fatal; everything cache-side degrades to a fresh parse.
    pub async fn resolve(&mut self, config_path: &Path, use_cache: bool) -> ArmadaResult<Instances> {
        if !use_cache {
            debug!("Cache disabled, parsing {}", config_path.display());
            return parse_file(&self.parser, config_path).await;
        }

        if let Err(e) = self.locator.ensure_dir().await {
            warn!("Cache dir unavailable ({}), parsing without cache", e);
            return parse_file(&self.parser, config_path).await;
        }

        let mut index = match self.index.take() {
            Some(index) => index,
            None => CacheIndex::load(&self.locator.index_path())
                .await
                .unwrap_or_else(|e| {
                    warn!("Cache index unusable ({}), starting empty", e);
                    CacheIndex::default()
                }),
        };

        let result = self.resolve_with_index(&mut index, config_path).await;
        self.index = Some(index);
        result
    }

    async fn resolve_with_index(
        &self,
        index: &mut CacheIndex,
        config_path: &Path,
    ) -> ArmadaResult<Instances> {
        let known = index
            .get_by_config_path(config_path)
            .map(|e| (e.mod_time, e.instances_path.clone()));

        let current = match file_mod_time(config_path).await {
            Ok(t) => Some(t),
            Err(e) => {
                warn!("Cannot stat {} ({}), parsing without cache", config_path.display(), e);
                None
            }
        };

        if let Some((stored, artifact_path)) = &known {
            if current == Some(*stored) {
                match load_artifact(artifact_path).await {
                    Ok(instances) => {
                        debug!(
                            "Cache hit for {}, loaded {}",
                            config_path.display(),
                            artifact_path.display()
                        );
                        if let Some(entry) = index.get_mut_by_config_path(config_path) {
                            entry.instances = instances.clone();
                        }
                        return Ok(instances);
                    }
                    Err(e) => {
                        warn!(
                            "Cache artifact {} unusable ({}), re-parsing",
                            artifact_path.display(),
                            e
                        );
                    }
                }
            } else {
                debug!("Inventory {} changed, refreshing cache", config_path.display());
            }
        }

        // Fresh or stale/missing: parse, then rebuild the entry
        let instances = parse_file(&self.parser, config_path).await?;

        let Some(mod_time) = current else {
            return Ok(instances);
        };

        let artifact = self.locator.artifact_path(config_path);
        if !self.write_artifact(&artifact, &instances).await {
            return Ok(instances);
        }

        match index.get_mut_by_config_path(config_path) {
            Some(entry) => {
                entry.instances_path = artifact;
                entry.mod_time = mod_time;
                entry.instances = instances.clone();
            }
            None => index.push(Cache {
                config_path: config_path.to_path_buf(),
                instances_path: artifact,
                mod_time,
                instances: instances.clone(),
            }),
        }

        if let Err(e) = index.save(&self.locator.index_path()).await {
            warn!("Failed to persist cache index: {}", e);
        }

        Ok(instances)
    }

    async fn write_artifact(&self, path: &Path, instances: &Instances) -> bool {
        let content = match serde_json::to_string_pretty(instances) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to serialize instances: {}", e);
                return false;
            }
        };

        match fs::write(path, content).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to write cache artifact {}: {}", path.display(), e);
                false
            }
        }
    }
}

async fn parse_file<P: InventoryParser>(parser: &P, path: &Path) -> ArmadaResult<Instances> {
    let bytes = fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ArmadaError::InventoryNotFound(path.to_path_buf())
        } else {
            ArmadaError::io(format!("reading inventory {}", path.display()), e)
        }
    })?;

    parser.parse(path, &bytes)
}
