//! Store configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Prefix shared by every key the application writes to the primary medium.
pub const DEFAULT_NAMESPACE_PREFIX: &str = "messages_app_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Tunables for a [`crate::DurableKvStore`]. Missing fields take their defaults.
pub struct DurableStoreConfig {
    /// Keys with this prefix belong to the application and are eligible for cleanup.
    pub namespace_prefix: String,
    /// Namespaced keys kept by a cleanup pass (the most recently inserted ones).
    pub cleanup_keep_recent: usize,
    /// Key written and removed to probe primary availability.
    pub probe_key: String,
    /// IndexedDB database name.
    pub db_name: String,
    /// IndexedDB schema version.
    pub db_version: u32,
    /// IndexedDB object store name.
    pub object_store: String,
}

impl Default for DurableStoreConfig {
    fn default() -> Self {
        Self {
            namespace_prefix: DEFAULT_NAMESPACE_PREFIX.to_string(),
            cleanup_keep_recent: 2,
            probe_key: "__storage_test__".to_string(),
            db_name: "disparuDB".to_string(),
            db_version: 1,
            object_store: "messages".to_string(),
        }
    }
}

impl DurableStoreConfig {
    /// Parses a JSON config object, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `raw` is not a valid config object.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Returns `name` qualified with the namespace prefix.
    pub fn namespaced_key(&self, name: &str) -> String {
        format!("{}{name}", self.namespace_prefix)
    }

    /// Returns `true` when `key` belongs to this application's namespace.
    pub fn is_namespaced(&self, key: &str) -> bool {
        key.starts_with(&self.namespace_prefix)
    }
}
