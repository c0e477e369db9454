use super::*;
use js_sys::Promise;
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen(inline_js = r#"
const connections = new Map();

function idbSupported() {
  return typeof indexedDB !== 'undefined';
}

function requestToPromise(req) {
  return new Promise((resolve, reject) => {
    req.onsuccess = () => resolve(req.result);
    req.onerror = () => reject(req.error || new Error('IndexedDB request failed'));
  });
}

function txDone(tx) {
  return new Promise((resolve, reject) => {
    tx.oncomplete = () => resolve();
    tx.onabort = () => reject(tx.error || new Error('IndexedDB transaction aborted'));
    tx.onerror = () => reject(tx.error || new Error('IndexedDB transaction error'));
  });
}

function openDb(dbName, dbVersion, storeName) {
  const cacheKey = `${dbName}@${dbVersion}`;
  const cached = connections.get(cacheKey);
  if (cached) {
    return cached;
  }
  const pending = new Promise((resolve, reject) => {
    if (!idbSupported()) {
      reject(new Error('IndexedDB is unavailable in this browser context'));
      return;
    }
    const req = indexedDB.open(dbName, dbVersion);
    req.onupgradeneeded = () => {
      const db = req.result;
      if (!db.objectStoreNames.contains(storeName)) {
        db.createObjectStore(storeName);
      }
    };
    req.onsuccess = () => resolve(req.result);
    req.onerror = () => reject(req.error || new Error('Failed to open IndexedDB'));
    req.onblocked = () => reject(new Error('IndexedDB open blocked by another connection'));
  });
  pending.catch(() => connections.delete(cacheKey));
  connections.set(cacheKey, pending);
  return pending;
}

export async function jsSecondaryOpen(dbName, dbVersion, storeName) {
  await openDb(dbName, dbVersion, storeName);
  return null;
}

export async function jsSecondaryGet(dbName, dbVersion, storeName, key) {
  const db = await openDb(dbName, dbVersion, storeName);
  const tx = db.transaction(storeName, 'readonly');
  const value = await requestToPromise(tx.objectStore(storeName).get(key));
  return typeof value === 'string' ? value : null;
}

export async function jsSecondaryPut(dbName, dbVersion, storeName, key, value) {
  const db = await openDb(dbName, dbVersion, storeName);
  const tx = db.transaction(storeName, 'readwrite');
  const done = txDone(tx);
  await requestToPromise(tx.objectStore(storeName).put(value, key));
  await done;
  return null;
}

export async function jsStorageEstimate() {
  if (typeof navigator === 'undefined' || !navigator.storage || !navigator.storage.estimate) {
    return null;
  }
  const estimate = await navigator.storage.estimate();
  return { usage_bytes: estimate.usage || 0, quota_bytes: estimate.quota || 0 };
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = jsSecondaryOpen)]
    fn js_secondary_open(db_name: &str, db_version: u32, store_name: &str) -> Promise;
    #[wasm_bindgen(js_name = jsSecondaryGet)]
    fn js_secondary_get(db_name: &str, db_version: u32, store_name: &str, key: &str) -> Promise;
    #[wasm_bindgen(js_name = jsSecondaryPut)]
    fn js_secondary_put(
        db_name: &str,
        db_version: u32,
        store_name: &str,
        key: &str,
        value: &str,
    ) -> Promise;
    #[wasm_bindgen(js_name = jsStorageEstimate)]
    fn js_storage_estimate() -> Promise;
}

async fn await_promise(promise: Promise) -> Result<JsValue, String> {
    JsFuture::from(promise).await.map_err(js_error_to_string)
}

fn js_error_to_string(err: JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    let field = |name: &str| {
        js_sys::Reflect::get(&err, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.as_string())
    };
    match (field("name"), field("message")) {
        (Some(name), Some(message)) => format!("{name}: {message}"),
        (None, Some(message)) => message,
        _ => format!("{err:?}"),
    }
}

pub async fn secondary_open(db_name: &str, db_version: u32, store_name: &str) -> Result<(), String> {
    let _ = await_promise(js_secondary_open(db_name, db_version, store_name)).await?;
    Ok(())
}

pub async fn secondary_get(
    db_name: &str,
    db_version: u32,
    store_name: &str,
    key: &str,
) -> Result<Option<String>, String> {
    let value = await_promise(js_secondary_get(db_name, db_version, store_name, key)).await?;
    Ok(value.as_string())
}

pub async fn secondary_put(
    db_name: &str,
    db_version: u32,
    store_name: &str,
    key: &str,
    value: &str,
) -> Result<(), String> {
    let _ = await_promise(js_secondary_put(db_name, db_version, store_name, key, value)).await?;
    Ok(())
}

pub async fn storage_estimate() -> Result<Option<StorageEstimate>, String> {
    let value = await_promise(js_storage_estimate()).await?;
    if value.is_null() || value.is_undefined() {
        Ok(None)
    } else {
        from_value(value).map(Some).map_err(|e| e.to_string())
    }
}
