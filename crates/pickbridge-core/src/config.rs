//! Bridge configuration types

use serde::{Deserialize, Serialize};

/// What the installer does when the final install path already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Refuse the install and report an error
    Fail,
    /// Remove the existing entry, then install in its place
    Overwrite,
    /// Install under the first free `<name>-N` sibling
    VersionSuffix,
}

impl Default for CollisionPolicy {
    fn default() -> Self {
        CollisionPolicy::Overwrite
    }
}

/// Configuration passed to the bridge at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// MIME hint attached to save (create-document) requests
    #[serde(default = "default_save_content_type")]
    pub save_content_type: String,

    /// MIME filter attached to install (open-archive) requests
    #[serde(default = "default_archive_content_type")]
    pub archive_content_type: String,

    /// How installs behave when the destination already exists
    #[serde(default)]
    pub collision_policy: CollisionPolicy,
}

fn default_save_content_type() -> String {
    "application/octet-stream".to_string()
}

fn default_archive_content_type() -> String {
    "application/zip".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            save_content_type: default_save_content_type(),
            archive_content_type: default_archive_content_type(),
            collision_policy: CollisionPolicy::default(),
        }
    }
}

impl BridgeConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Set the collision policy
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }
}
