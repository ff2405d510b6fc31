//! Host inventory parsing and label filters
//!
//! Inventories are user-authored TOML files of `[[instances]]` tables:
//!
//! ```toml
//! [[instances]]
//! address = "10.0.0.1"
//! port = 22
//! username = "root"
//! password = "aHVudGVyMg=="   # base64-encoded
//!
//! [instances.labels]
//! mysql = "slave"
//! zone = "us"
//! ```

pub mod instance;

pub use instance::{Instance, Instances, SshEndpoint};

use crate::error::{ArmadaError, ArmadaResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Parser seam consumed by the cache resolver.
///
/// Takes the raw file bytes; `path` is only for error context. Test doubles
/// implement this to observe how often a resolution actually re-parses.
pub trait InventoryParser {
    fn parse(&self, path: &Path, bytes: &[u8]) -> ArmadaResult<Instances>;
}

#[derive(Debug, Deserialize)]
struct InventoryDoc {
    #[serde(default)]
    instances: Instances,
}

/// TOML inventory parser
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlInventory;

impl InventoryParser for TomlInventory {
    fn parse(&self, path: &Path, bytes: &[u8]) -> ArmadaResult<Instances> {
        let text = std::str::from_utf8(bytes).map_err(|e| ArmadaError::InventoryParse {
            path: path.to_path_buf(),
            reason: format!("not valid UTF-8: {}", e),
        })?;

        let doc: InventoryDoc =
            toml::from_str(text).map_err(|e| ArmadaError::InventoryParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(doc.instances)
    }
}

/// Parse a `key=value,key2=value2` filter string from the CLI.
///
/// Empty input yields an empty (match-all) filter. A later duplicate key
/// overrides an earlier one.
pub fn parse_label_filter(raw: &str) -> ArmadaResult<HashMap<String, String>> {
    let raw = raw.trim();
    let mut filter = HashMap::new();

    if raw.is_empty() {
        return Ok(filter);
    }

    for pair in raw.split(',') {
        let pair = pair.trim();
        let (key, value) = pair.split_once('=').ok_or_else(|| ArmadaError::LabelFilter {
            filter: raw.to_string(),
            reason: format!("'{}' is missing '='", pair),
        })?;

        if key.is_empty() {
            return Err(ArmadaError::LabelFilter {
                filter: raw.to_string(),
                reason: format!("'{}' has an empty key", pair),
            });
        }

        filter.insert(key.to_string(), value.to_string());
    }

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SAMPLE: &str = r#"
[[instances]]
address = "10.0.0.1"
port = 2222
username = "root"
password = "aHVudGVyMg=="

[instances.labels]
mysql = "slave"
zone = "us"

[[instances]]
address = "10.0.0.2"
username = "ops"
password = "cGFzcw=="
"#;

    #[test]
    fn parse_sample_inventory() {
        let instances = TomlInventory
            .parse(&PathBuf::from("inventory.toml"), SAMPLE.as_bytes())
            .unwrap();

        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].ssh.address, "10.0.0.1");
        assert_eq!(instances[0].ssh.port, 2222);
        assert_eq!(instances[0].labels.get("mysql"), Some(&"slave".to_string()));
        // port and labels fall back to defaults
        assert_eq!(instances[1].ssh.port, 22);
        assert!(instances[1].labels.is_empty());
    }

    #[test]
    fn parse_empty_document() {
        let instances = TomlInventory
            .parse(&PathBuf::from("inventory.toml"), b"")
            .unwrap();
        assert!(instances.is_empty());
    }

    #[test]
    fn parse_malformed_toml() {
        let result = TomlInventory.parse(&PathBuf::from("inventory.toml"), b"[[instances\n");
        match result {
            Err(ArmadaError::InventoryParse { path, .. }) => {
                assert_eq!(path, PathBuf::from("inventory.toml"));
            }
            other => panic!("expected InventoryParse, got {:?}", other),
        }
    }

    #[test]
    fn parse_missing_required_field() {
        let result = TomlInventory.parse(
            &PathBuf::from("inventory.toml"),
            b"[[instances]]\naddress = \"10.0.0.1\"\n",
        );
        assert!(matches!(result, Err(ArmadaError::InventoryParse { .. })));
    }

    #[test]
    fn parse_non_utf8_bytes() {
        let result = TomlInventory.parse(&PathBuf::from("inventory.toml"), &[0xff, 0xfe]);
        assert!(matches!(result, Err(ArmadaError::InventoryParse { .. })));
    }

    #[test]
    fn label_filter_single_pair() {
        let filter = parse_label_filter("mysql=slave").unwrap();
        assert_eq!(filter.len(), 1);
        assert_eq!(filter.get("mysql"), Some(&"slave".to_string()));
    }

    #[test]
    fn label_filter_multiple_pairs() {
        let filter = parse_label_filter("mysql=slave, zone=us").unwrap();
        assert_eq!(filter.len(), 2);
        assert_eq!(filter.get("zone"), Some(&"us".to_string()));
    }

    #[test]
    fn label_filter_empty_is_match_all() {
        assert!(parse_label_filter("").unwrap().is_empty());
        assert!(parse_label_filter("   ").unwrap().is_empty());
    }

    #[test]
    fn label_filter_empty_value_allowed() {
        let filter = parse_label_filter("flag=").unwrap();
        assert_eq!(filter.get("flag"), Some(&String::new()));
    }

    #[test]
    fn label_filter_missing_eq_rejected() {
        let result = parse_label_filter("mysql");
        assert!(matches!(result, Err(ArmadaError::LabelFilter { .. })));
    }

    #[test]
    fn label_filter_empty_key_rejected() {
        let result = parse_label_filter("=slave");
        assert!(matches!(result, Err(ArmadaError::LabelFilter { .. })));
    }
}
