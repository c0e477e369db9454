use disparu_host_web::{primary_medium, secondary_medium, usage_estimator, IndexedDbTarget};

use crate::{DurableKvStore, DurableStoreConfig};

/// Builds an uninitialized store over the media selected for this build.
///
/// In browser builds that is `localStorage`, the configured IndexedDB object store, and the
/// Storage API estimate. Under the `host-stub` feature every medium is a no-op, so the store
/// reports [`crate::StorageCapability::Unavailable`].
pub fn browser_store(config: DurableStoreConfig) -> DurableKvStore {
    let target = IndexedDbTarget {
        db_name: config.db_name.clone(),
        db_version: config.db_version,
        store_name: config.object_store.clone(),
    };
    DurableKvStore::new(primary_medium(), secondary_medium(target), config)
        .with_usage_estimator(usage_estimator())
}
