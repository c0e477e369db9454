//! Dual-medium durable store with failover and degraded-mode reporting.

use std::cell::{Cell, RefCell};

use disparu_host::{MediumError, PrimaryMedium, SecondaryMedium, UsageEstimator};

use crate::{DurableStoreConfig, StorageCapability, StorageStatus, StorageUnavailable, StorePhase};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CleanupReport {
    pub(crate) removed: usize,
    pub(crate) failed: usize,
}

/// Best-effort durable string storage across a primary and a secondary medium.
///
/// The primary medium is probed on every operation rather than once at startup, because its
/// availability can change mid-session. The secondary medium is opened once by
/// [`DurableKvStore::initialize`]; if that fails it stays unused for the store's lifetime.
///
/// All state lives in `Cell`/`RefCell`: the store is meant for a single UI thread.
pub struct DurableKvStore {
    primary: Box<dyn PrimaryMedium>,
    secondary: Box<dyn SecondaryMedium>,
    estimator: Option<Box<dyn UsageEstimator>>,
    config: DurableStoreConfig,
    phase: Cell<StorePhase>,
    secondary_open: Cell<bool>,
    usage_estimate: RefCell<Option<String>>,
}

impl std::fmt::Debug for DurableKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurableKvStore")
            .field("config", &self.config)
            .field("phase", &self.phase.get())
            .field("secondary_open", &self.secondary_open.get())
            .field("usage_estimate", &self.usage_estimate.borrow())
            .finish_non_exhaustive()
    }
}

impl DurableKvStore {
    /// Creates an uninitialized store over the given media.
    pub fn new(
        primary: impl PrimaryMedium + 'static,
        secondary: impl SecondaryMedium + 'static,
        config: DurableStoreConfig,
    ) -> Self {
        Self {
            primary: Box::new(primary),
            secondary: Box::new(secondary),
            estimator: None,
            config,
            phase: Cell::new(StorePhase::Uninitialized),
            secondary_open: Cell::new(false),
            usage_estimate: RefCell::new(None),
        }
    }

    /// Attaches an optional usage estimator consulted by
    /// [`DurableKvStore::refresh_usage_estimate`].
    pub fn with_usage_estimator(mut self, estimator: impl UsageEstimator + 'static) -> Self {
        self.estimator = Some(Box::new(estimator));
        self
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &DurableStoreConfig {
        &self.config
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> StorePhase {
        self.phase.get()
    }

    /// Returns which media are usable right now. Probes the primary medium.
    pub fn capability(&self) -> StorageCapability {
        StorageCapability::from_flags(self.primary_available(), self.secondary_open.get())
    }

    /// Opens the secondary medium.
    ///
    /// Failure is logged and recorded as "secondary unavailable"; it never reaches the caller
    /// and never affects the primary medium. Calls after the first are no-ops.
    pub async fn initialize(&self) {
        if self.phase.get() != StorePhase::Uninitialized {
            return;
        }
        self.phase.set(StorePhase::Initializing);
        match self.secondary.open().await {
            Ok(()) => self.secondary_open.set(true),
            Err(err) => {
                leptos::logging::warn!("secondary storage not available: {err}");
                self.secondary_open.set(false);
            }
        }
        self.phase.set(StorePhase::Ready);
    }

    /// Probes the primary medium with a sentinel write and removal.
    pub fn primary_available(&self) -> bool {
        self.probe_primary().is_ok()
    }

    fn probe_primary(&self) -> Result<(), MediumError> {
        let probe = self.config.probe_key.as_str();
        self.primary
            .set_item(probe, probe)
            .and_then(|()| self.primary.remove_item(probe))
    }

    /// Writes `value` under `key`.
    ///
    /// Tries the primary medium (with one cleanup-and-retry), then the secondary medium. A value
    /// written to the primary is not also written to the secondary.
    ///
    /// A primary too full to take even the probe sentinel still gets the cleanup-and-retry pass;
    /// it counts as present but rejecting, not as missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageUnavailable::NoMedium`] when neither medium is usable and
    /// [`StorageUnavailable::WriteRejected`] when a present medium rejected the write.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), StorageUnavailable> {
        let mut rejection: Option<MediumError> = None;

        let primary_result = match self.probe_primary() {
            Ok(()) => Some(self.write_primary(key, value)),
            Err(err) if err.is_quota_exceeded() => {
                leptos::logging::warn!("primary storage is full: {err}");
                Some(self.write_primary(key, value))
            }
            Err(MediumError::Unavailable(_)) => None,
            Err(err) => Some(Err(err)),
        };
        match primary_result {
            Some(Ok(())) => return Ok(()),
            Some(Err(err)) => {
                leptos::logging::warn!("primary write of `{key}` failed: {err}");
                rejection = Some(err);
            }
            None => {}
        }

        if self.secondary_open.get() {
            match self.secondary.put(key, value).await {
                Ok(()) => return Ok(()),
                Err(err) => {
                    leptos::logging::error!("secondary write of `{key}` failed: {err}");
                    rejection = Some(err);
                }
            }
        }

        Err(match rejection {
            Some(err) => StorageUnavailable::WriteRejected(err.to_string()),
            None => StorageUnavailable::NoMedium,
        })
    }

    /// Reads the value under `key`.
    ///
    /// A clean miss on an available primary medium returns `None` without consulting the
    /// secondary medium; only a failed primary read falls through. Returns `None` when neither
    /// medium can answer.
    ///
    /// The primary is read only when its probe passes, so a primary too full to take the probe
    /// sentinel is skipped even though it may still hold the value.
    pub async fn get(&self, key: &str) -> Option<String> {
        if self.primary_available() {
            match self.primary.get_item(key) {
                Ok(value) => return value,
                Err(err) => leptos::logging::warn!("primary read of `{key}` failed: {err}"),
            }
        }

        if self.secondary_open.get() {
            match self.secondary.get(key).await {
                Ok(value) => return value,
                Err(err) => leptos::logging::warn!("secondary read of `{key}` failed: {err}"),
            }
        }

        None
    }

    /// Returns a status snapshot without waiting on any asynchronous query.
    ///
    /// `usage_estimate` holds the result of the last completed
    /// [`DurableKvStore::refresh_usage_estimate`], if any.
    pub fn describe_status(&self) -> StorageStatus {
        StorageStatus {
            primary_available: self.primary_available(),
            secondary_available: self.secondary_open.get(),
            usage_estimate: self.usage_estimate.borrow().clone(),
        }
    }

    /// Queries the usage estimator and caches a formatted estimate for later snapshots.
    ///
    /// Errors are logged and leave any previous estimate in place.
    pub async fn refresh_usage_estimate(&self) -> Option<String> {
        if let Some(estimator) = self.estimator.as_ref() {
            match estimator.estimate().await {
                Ok(Some(estimate)) => {
                    if let Some(text) = estimate.describe() {
                        *self.usage_estimate.borrow_mut() = Some(text);
                    }
                }
                Ok(None) => {}
                Err(err) => leptos::logging::log!("storage usage estimate unavailable: {err}"),
            }
        }
        self.usage_estimate.borrow().clone()
    }

    // Write, clean up, retry once. No await in between, so no other call can interleave.
    fn write_primary(&self, key: &str, value: &str) -> Result<(), MediumError> {
        let first = match self.primary.set_item(key, value) {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };
        leptos::logging::warn!("primary write of `{key}` failed, cleaning up: {first}");

        let report = self.cleanup_primary();
        if report.removed > 0 || report.failed > 0 {
            leptos::logging::log!(
                "primary cleanup removed {} keys ({} removals failed)",
                report.removed,
                report.failed
            );
        }

        self.primary.set_item(key, value)
    }

    fn cleanup_primary(&self) -> CleanupReport {
        let keys = match self.primary.keys() {
            Ok(keys) => keys,
            Err(err) => {
                leptos::logging::warn!("primary cleanup could not list keys: {err}");
                return CleanupReport::default();
            }
        };

        let namespaced: Vec<String> = keys
            .into_iter()
            .filter(|key| self.config.is_namespaced(key))
            .collect();
        let excess = namespaced
            .len()
            .saturating_sub(self.config.cleanup_keep_recent);

        let mut report = CleanupReport::default();
        for key in &namespaced[..excess] {
            match self.primary.remove_item(key) {
                Ok(()) => report.removed += 1,
                Err(err) => {
                    leptos::logging::warn!("failed to remove old storage key `{key}`: {err}");
                    report.failed += 1;
                }
            }
        }
        report
    }
}
