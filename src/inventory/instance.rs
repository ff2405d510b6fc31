//! Host instance records and label matching

use crate::error::ArmadaResult;
use crate::secret;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// SSH connection descriptor for one host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshEndpoint {
    /// Host address (IP or hostname)
    pub address: String,

    /// SSH port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Login username
    pub username: String,

    /// Login password, base64-encoded
    pub password: String,
}

fn default_port() -> u16 {
    22
}

impl SshEndpoint {
    /// `address:port` form used for TCP dialing
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

/// One inventory host plus its descriptive labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Connection descriptor
    #[serde(flatten)]
    pub ssh: SshEndpoint,

    /// Label key/value pairs (keys unique, case-sensitive)
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// Ordered host sequence; duplicates are permitted and preserved
pub type Instances = Vec<Instance>;

impl Instance {
    /// Subset-with-equality label match: every filter key must be present
    /// with an equal value. An empty filter matches every instance; a
    /// filter key absent from the instance's labels is a non-match.
    pub fn has_labels(&self, filter: &HashMap<String, String>) -> bool {
        filter
            .iter()
            .all(|(k, v)| self.labels.get(k) == Some(v))
    }

    /// Render with the stored password decoded to plaintext
    pub fn describe_decoded(&self) -> ArmadaResult<String> {
        let plain = secret::decode_password(&self.ssh.password)?;
        Ok(format!(
            "Address: {}, Port: {}, Username: {}, Password: {}, Labels: {}",
            self.ssh.address,
            self.ssh.port,
            self.ssh.username,
            plain,
            format_labels(&self.labels)
        ))
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Address: {}, Port: {}, Username: {}, Password: {}, Labels: {}",
            self.ssh.address,
            self.ssh.port,
            self.ssh.username,
            self.ssh.password,
            format_labels(&self.labels)
        )
    }
}

/// Render labels as `{ k: v, ... }` with keys sorted for stable output
fn format_labels(labels: &HashMap<String, String>) -> String {
    if labels.is_empty() {
        return "{}".to_string();
    }

    let mut keys: Vec<&String> = labels.keys().collect();
    keys.sort();

    let body = keys
        .iter()
        .map(|k| format!("{}: {}", k, labels[*k]))
        .collect::<Vec<_>>()
        .join(", ");

    format!("{{ {} }}", body)
}
