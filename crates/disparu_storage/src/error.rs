//! Errors surfaced by the durable store.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// No medium could service a write.
pub enum StorageUnavailable {
    /// Neither medium is usable in this environment; nothing will be saved.
    #[error("storage unavailable: no medium is usable")]
    NoMedium,
    /// At least one medium was usable but every write path rejected the value.
    #[error("storage unavailable: {0}")]
    WriteRejected(String),
}

impl StorageUnavailable {
    /// Returns `true` when no medium exists at all, as opposed to a rejected write.
    pub fn is_no_medium(&self) -> bool {
        matches!(self, Self::NoMedium)
    }
}

#[derive(Debug, Error)]
/// Failure to load a [`crate::DurableStoreConfig`].
pub enum ConfigError {
    /// The config text is not a valid config object.
    #[error("invalid store config: {0}")]
    Invalid(#[from] serde_json::Error),
}
