//! Error types for Armada
//!
//! All modules use `ArmadaResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Armada operations
pub type ArmadaResult<T> = Result<T, ArmadaError>;

/// All errors that can occur in Armada
#[derive(Error, Debug)]
pub enum ArmadaError {
    // Inventory errors
    #[error("Inventory file not found: {0}")]
    InventoryNotFound(PathBuf),

    #[error("Invalid inventory at {path}: {reason}")]
    InventoryParse { path: PathBuf, reason: String },

    #[error("Invalid label filter '{filter}': {reason}")]
    LabelFilter { filter: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // Credential errors
    #[error("Failed to decode stored password: {0}")]
    PasswordDecode(String),

    // Check errors
    #[error("{0} host(s) unreachable")]
    HostsUnreachable(usize),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ArmadaError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InventoryNotFound(_) => {
                Some("Check the path, or create an inventory with [[instances]] entries")
            }
            Self::LabelFilter { .. } => Some("Use key=value pairs separated by commas"),
            Self::HostsUnreachable(_) => Some("Run with -v to see per-host connect errors"),
            _ => None,
        }
    }
}
