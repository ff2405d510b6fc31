//! Command implementations

pub mod cache;
pub mod check;
pub mod config;
pub mod list;

pub use cache::execute as cache;
pub use check::execute as check;
pub use config::execute as config;
pub use list::execute as list;

use crate::cache::{CacheLocator, Resolver};
use crate::config::Config;
use crate::error::ArmadaResult;
use crate::inventory::{Instances, TomlInventory};
use std::path::Path;

/// Cache location from config, falling back to the default root
pub(crate) fn locator_from(config: &Config) -> CacheLocator {
    match &config.cache.dir {
        Some(dir) => CacheLocator::with_dir(dir),
        None => CacheLocator::new(),
    }
}

/// Resolve an inventory through the cache, honoring the `--no-cache` flag
/// and the config-level cache switch
pub(crate) async fn resolve_instances(
    inventory: &Path,
    no_cache: bool,
    config: &Config,
) -> ArmadaResult<Instances> {
    let inventory = inventory
        .canonicalize()
        .unwrap_or_else(|_| inventory.to_path_buf());

    let use_cache = config.cache.enabled && !no_cache;
    let mut resolver = Resolver::new(locator_from(config), TomlInventory);
    resolver.resolve(&inventory, use_cache).await
}
