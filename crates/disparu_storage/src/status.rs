//! Store lifecycle and capability snapshots.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
/// Lifecycle of a [`crate::DurableKvStore`].
pub enum StorePhase {
    /// `initialize` has not been called.
    Uninitialized,
    /// The secondary medium is being opened.
    Initializing,
    /// Initialization finished; see [`StorageCapability`] for what is usable.
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
/// Which media can currently service operations.
pub enum StorageCapability {
    /// Both media are usable.
    PrimaryAndSecondary,
    /// Only the primary medium is usable.
    PrimaryOnly,
    /// Only the secondary medium is usable.
    SecondaryOnly,
    /// Nothing is usable; the application runs in memory only.
    Unavailable,
}

impl StorageCapability {
    /// Combines the two availability flags.
    pub const fn from_flags(primary: bool, secondary: bool) -> Self {
        match (primary, secondary) {
            (true, true) => Self::PrimaryAndSecondary,
            (true, false) => Self::PrimaryOnly,
            (false, true) => Self::SecondaryOnly,
            (false, false) => Self::Unavailable,
        }
    }

    /// Returns `true` when at least one medium is usable.
    pub const fn can_persist(self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Point-in-time view of storage health.
pub struct StorageStatus {
    /// Whether the primary medium passed its probe when the snapshot was taken.
    pub primary_available: bool,
    /// Whether the secondary medium opened during initialization.
    pub secondary_available: bool,
    /// Last known usage estimate, e.g. `"3% of 512MB"`. Absent until an estimate completes.
    pub usage_estimate: Option<String>,
}

impl StorageStatus {
    /// Returns the capability implied by the availability flags.
    pub const fn capability(&self) -> StorageCapability {
        StorageCapability::from_flags(self.primary_available, self.secondary_available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_follows_flags() {
        assert_eq!(
            StorageCapability::from_flags(true, true),
            StorageCapability::PrimaryAndSecondary
        );
        assert_eq!(
            StorageCapability::from_flags(false, true),
            StorageCapability::SecondaryOnly
        );
        assert!(!StorageCapability::from_flags(false, false).can_persist());
        assert!(StorageCapability::PrimaryOnly.can_persist());
    }

    #[test]
    fn status_serializes_snake_case_fields() {
        let status = StorageStatus {
            primary_available: true,
            secondary_available: false,
            usage_estimate: None,
        };
        let value = serde_json::to_value(&status).expect("serialize status");
        assert_eq!(value["primary_available"], serde_json::json!(true));
        assert_eq!(value["usage_estimate"], serde_json::Value::Null);
        assert_eq!(status.capability(), StorageCapability::PrimaryOnly);
    }
}
