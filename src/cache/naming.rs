//! Cache artifact naming
//!
//! Artifact names carry a fresh random token so a refresh of the same
//! inventory never collides with a still-referenced prior artifact. Old
//! artifacts may be left behind; `armada cache clear` removes them.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::path::Path;

pub(crate) const ARTIFACT_PREFIX: &str = "cache";
pub(crate) const ARTIFACT_EXT: &str = "json";
pub(crate) const INDEX_FILE_NAME: &str = "cache_index.json";

const TOKEN_LEN: usize = 5;

/// Generate an artifact file name for an inventory path.
///
/// Shape: `cache_<random5>_<stem>.json`, where `<stem>` is the inventory
/// file's base name with its extension stripped. Deliberately
/// non-deterministic: every call draws a new token.
pub fn artifact_file_name(config_path: &Path) -> String {
    let stem = config_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "inventory".to_string());

    format!(
        "{}_{}_{}.{}",
        ARTIFACT_PREFIX,
        random_token(TOKEN_LEN),
        stem,
        ARTIFACT_EXT
    )
}

fn random_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
