//! IndexedDB-backed secondary medium.

use disparu_host::{MediumError, MediumFuture, SecondaryMedium};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Database, schema version, and object store a [`WebIndexedDb`] reads and writes.
pub struct IndexedDbTarget {
    /// Database name.
    pub db_name: String,
    /// Database schema version passed to `indexedDB.open`.
    pub db_version: u32,
    /// Object store holding values under out-of-line keys.
    pub store_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Secondary medium backed by one IndexedDB object store.
pub struct WebIndexedDb {
    target: IndexedDbTarget,
}

impl WebIndexedDb {
    /// Creates a medium for `target`. Nothing is opened until [`SecondaryMedium::open`].
    pub fn new(target: IndexedDbTarget) -> Self {
        Self { target }
    }

    /// Returns the configured target.
    pub fn target(&self) -> &IndexedDbTarget {
        &self.target
    }
}

fn classify(err: String) -> MediumError {
    if err.to_ascii_lowercase().contains("quota") {
        MediumError::QuotaExceeded(err)
    } else {
        MediumError::Failed(err)
    }
}

impl SecondaryMedium for WebIndexedDb {
    fn open<'a>(&'a self) -> MediumFuture<'a, Result<(), MediumError>> {
        Box::pin(async move {
            crate::bridge::secondary_open(&self.target)
                .await
                .map_err(MediumError::Unavailable)
        })
    }

    fn get<'a>(&'a self, key: &'a str) -> MediumFuture<'a, Result<Option<String>, MediumError>> {
        Box::pin(async move {
            crate::bridge::secondary_get(&self.target, key)
                .await
                .map_err(classify)
        })
    }

    fn put<'a>(&'a self, key: &'a str, value: &'a str) -> MediumFuture<'a, Result<(), MediumError>> {
        Box::pin(async move {
            crate::bridge::secondary_put(&self.target, key, value)
                .await
                .map_err(classify)
        })
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

    #[test]
    fn write_errors_mentioning_quota_are_quota_exceeded() {
        assert!(classify("QuotaExceededError: disk full".to_string()).is_quota_exceeded());
        assert!(!classify("transaction aborted".to_string()).is_quota_exceeded());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_indexed_db_never_opens() {
        let medium = WebIndexedDb::new(target());
        let medium_obj: &dyn SecondaryMedium = &medium;

        assert!(matches!(
            block_on(medium_obj.open()),
            Err(MediumError::Unavailable(_))
        ));
        assert!(block_on(medium_obj.get("k")).is_err());
        assert!(block_on(medium_obj.put("k", "v")).is_err());
        assert_eq!(medium.target().store_name, "messages");
    }
}
