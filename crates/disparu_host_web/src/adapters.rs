use disparu_host::{
    MediumError, MediumFuture, NoopPrimaryMedium, NoopSecondaryMedium, NoopUsageEstimator,
    PrimaryMedium, SecondaryMedium, StorageEstimate, UsageEstimator,
};

use crate::{IndexedDbTarget, WebIndexedDb, WebLocalStorage, WebStorageEstimator};

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for the storage media.
pub enum HostStrategy {
    /// `localStorage`, IndexedDB, and the Storage API.
    Browser,
    /// No-op media used by hosts without device storage (and by headless builds).
    Stub,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "host-stub")]
    {
        HostStrategy::Stub
    }

    #[cfg(not(feature = "host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Stub => "host-stub",
    }
}

/// Adapter enum that erases the concrete primary medium behind [`PrimaryMedium`].
#[derive(Debug, Clone, Copy)]
pub enum PrimaryMediumAdapter {
    /// `window.localStorage`.
    Browser(WebLocalStorage),
    /// Always-unavailable fallback.
    Stub(NoopPrimaryMedium),
}

impl PrimaryMedium for PrimaryMediumAdapter {
    fn get_item(&self, key: &str) -> Result<Option<String>, MediumError> {
        match self {
            Self::Browser(medium) => medium.get_item(key),
            Self::Stub(medium) => medium.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), MediumError> {
        match self {
            Self::Browser(medium) => medium.set_item(key, value),
            Self::Stub(medium) => medium.set_item(key, value),
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), MediumError> {
        match self {
            Self::Browser(medium) => medium.remove_item(key),
            Self::Stub(medium) => medium.remove_item(key),
        }
    }

    fn keys(&self) -> Result<Vec<String>, MediumError> {
        match self {
            Self::Browser(medium) => medium.keys(),
            Self::Stub(medium) => medium.keys(),
        }
    }
}

/// Adapter enum that erases the concrete secondary medium behind [`SecondaryMedium`].
#[derive(Debug, Clone)]
pub enum SecondaryMediumAdapter {
    /// IndexedDB object store.
    Browser(WebIndexedDb),
    /// Never-opening fallback.
    Stub(NoopSecondaryMedium),
}

impl SecondaryMedium for SecondaryMediumAdapter {
    fn open<'a>(&'a self) -> MediumFuture<'a, Result<(), MediumError>> {
        match self {
            Self::Browser(medium) => medium.open(),
            Self::Stub(medium) => medium.open(),
        }
    }

    fn get<'a>(&'a self, key: &'a str) -> MediumFuture<'a, Result<Option<String>, MediumError>> {
        match self {
            Self::Browser(medium) => medium.get(key),
            Self::Stub(medium) => medium.get(key),
        }
    }

    fn put<'a>(&'a self, key: &'a str, value: &'a str) -> MediumFuture<'a, Result<(), MediumError>> {
        match self {
            Self::Browser(medium) => medium.put(key, value),
            Self::Stub(medium) => medium.put(key, value),
        }
    }
}

/// Adapter enum that erases the concrete estimator behind [`UsageEstimator`].
#[derive(Debug, Clone, Copy)]
pub enum UsageEstimatorAdapter {
    /// `navigator.storage.estimate()`.
    Browser(WebStorageEstimator),
    /// Estimator that never knows.
    Stub(NoopUsageEstimator),
}

impl UsageEstimator for UsageEstimatorAdapter {
    fn estimate<'a>(&'a self) -> MediumFuture<'a, Result<Option<StorageEstimate>, MediumError>> {
        match self {
            Self::Browser(estimator) => estimator.estimate(),
            Self::Stub(estimator) => estimator.estimate(),
        }
    }
}

/// Builds the primary medium for the selected host strategy.
pub fn primary_medium() -> PrimaryMediumAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => PrimaryMediumAdapter::Browser(WebLocalStorage),
        HostStrategy::Stub => PrimaryMediumAdapter::Stub(NoopPrimaryMedium),
    }
}

/// Builds the secondary medium for the selected host strategy.
pub fn secondary_medium(target: IndexedDbTarget) -> SecondaryMediumAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => SecondaryMediumAdapter::Browser(WebIndexedDb::new(target)),
        HostStrategy::Stub => SecondaryMediumAdapter::Stub(NoopSecondaryMedium),
    }
}

/// Builds the usage estimator for the selected host strategy.
pub fn usage_estimator() -> UsageEstimatorAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => UsageEstimatorAdapter::Browser(WebStorageEstimator),
        HostStrategy::Stub => UsageEstimatorAdapter::Stub(NoopUsageEstimator),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    fn target() -> IndexedDbTarget {
        IndexedDbTarget {
            db_name: "disparuDB".to_string(),
            db_version: 1,
            store_name: "messages".to_string(),
        }
    }

    #[cfg(not(feature = "host-stub"))]
    #[test]
    fn default_build_selects_browser_media() {
        assert_eq!(selected_host_strategy(), HostStrategy::Browser);
        assert_eq!(host_strategy_name(), "browser");
        assert!(matches!(primary_medium(), PrimaryMediumAdapter::Browser(_)));
        assert!(matches!(
            secondary_medium(target()),
            SecondaryMediumAdapter::Browser(_)
        ));
        assert!(matches!(usage_estimator(), UsageEstimatorAdapter::Browser(_)));
    }

    #[test]
    fn stub_adapters_delegate_to_noop_media() {
        let primary = PrimaryMediumAdapter::Stub(NoopPrimaryMedium);
        let secondary = SecondaryMediumAdapter::Stub(NoopSecondaryMedium);
        let estimator = UsageEstimatorAdapter::Stub(NoopUsageEstimator);

        assert!(primary.set_item("k", "v").is_err());
        assert!(block_on(secondary.open()).is_err());
        assert_eq!(block_on(estimator.estimate()).expect("estimate"), None);
    }
}
