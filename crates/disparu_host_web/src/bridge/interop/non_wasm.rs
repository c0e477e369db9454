use super::*;

fn unsupported() -> String {
    "Browser storage APIs are only available when compiled for wasm32".to_string()
}

pub async fn secondary_open(
    _db_name: &str,
    _db_version: u32,
    _store_name: &str,
) -> Result<(), String> {
    Err(unsupported())
}

pub async fn secondary_get(
    _db_name: &str,
    _db_version: u32,
    _store_name: &str,
    _key: &str,
) -> Result<Option<String>, String> {
    Err(unsupported())
}

pub async fn secondary_put(
    _db_name: &str,
    _db_version: u32,
    _store_name: &str,
    _key: &str,
    _value: &str,
) -> Result<(), String> {
    Err(unsupported())
}

pub async fn storage_estimate() -> Result<Option<StorageEstimate>, String> {
    Ok(None)
}
