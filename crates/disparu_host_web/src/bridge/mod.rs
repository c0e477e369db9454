//! Browser capability bridge for the IndexedDB medium and the storage estimate.
//!
//! Calls route through `interop`, which picks the inline-JS implementation on `wasm32` and a
//! shim reporting everything as unsupported elsewhere.

mod interop;

use disparu_host::StorageEstimate;

use crate::storage::indexed_db::IndexedDbTarget;

pub(crate) async fn secondary_open(target: &IndexedDbTarget) -> Result<(), String> {
    interop::secondary_open(&target.db_name, target.db_version, &target.store_name).await
}

pub(crate) async fn secondary_get(
    target: &IndexedDbTarget,
    key: &str,
) -> Result<Option<String>, String> {
    interop::secondary_get(&target.db_name, target.db_version, &target.store_name, key).await
}

pub(crate) async fn secondary_put(
    target: &IndexedDbTarget,
    key: &str,
    value: &str,
) -> Result<(), String> {
    interop::secondary_put(
        &target.db_name,
        target.db_version,
        &target.store_name,
        key,
        value,
    )
    .await
}

pub(crate) async fn storage_estimate() -> Result<Option<StorageEstimate>, String> {
    interop::storage_estimate().await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn bridge_public_api_non_wasm_parity() {
        let target = IndexedDbTarget {
            db_name: "disparuDB".to_string(),
            db_version: 1,
            store_name: "messages".to_string(),
        };
        let expected =
            "Browser storage APIs are only available when compiled for wasm32".to_string();

        assert_eq!(
            block_on(secondary_open(&target)).expect_err("open should fail"),
            expected
        );
        assert_eq!(
            block_on(secondary_get(&target, "k")).expect_err("get should fail"),
            expected
        );
        assert_eq!(
            block_on(secondary_put(&target, "k", "v")).expect_err("put should fail"),
            expected
        );
        assert_eq!(block_on(storage_estimate()).expect("estimate"), None);
    }
}
