//! Target-specific transport behind the bridge.

use disparu_host::StorageEstimate;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub async fn secondary_open(db_name: &str, db_version: u32, store_name: &str) -> Result<(), String> {
    imp::secondary_open(db_name, db_version, store_name).await
}

pub async fn secondary_get(
    db_name: &str,
    db_version: u32,
    store_name: &str,
    key: &str,
) -> Result<Option<String>, String> {
    imp::secondary_get(db_name, db_version, store_name, key).await
}

pub async fn secondary_put(
    db_name: &str,
    db_version: u32,
    store_name: &str,
    key: &str,
    value: &str,
) -> Result<(), String> {
    imp::secondary_put(db_name, db_version, store_name, key, value).await
}

pub async fn storage_estimate() -> Result<Option<StorageEstimate>, String> {
    imp::storage_estimate().await
}
