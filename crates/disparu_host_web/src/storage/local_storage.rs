//! `localStorage`-backed primary medium.
//!
//! Every call re-resolves `window.localStorage`, since access can start throwing mid-session
//! (storage disabled, private browsing, quota exhausted).

use disparu_host::{MediumError, PrimaryMedium};

#[derive(Debug, Clone, Copy, Default)]
/// Primary medium backed by `window.localStorage`.
pub struct WebLocalStorage;

#[cfg(target_arch = "wasm32")]
mod imp {
    use disparu_host::MediumError;
    use wasm_bindgen::JsValue;

    pub(super) fn storage() -> Result<web_sys::Storage, MediumError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| MediumError::Unavailable("localStorage".to_string()))
    }

    fn error_name(err: &JsValue) -> Option<String> {
        js_sys::Reflect::get(err, &JsValue::from_str("name"))
            .ok()
            .and_then(|name| name.as_string())
    }

    pub(super) fn classify(op: &str, err: JsValue) -> MediumError {
        match error_name(&err).as_deref() {
            Some("QuotaExceededError") | Some("NS_ERROR_DOM_QUOTA_REACHED") => {
                MediumError::QuotaExceeded(format!("localStorage {op} failed: {err:?}"))
            }
            Some("SecurityError") => {
                MediumError::Unavailable(format!("localStorage ({op} denied)"))
            }
            _ => MediumError::Failed(format!("localStorage {op} failed: {err:?}")),
        }
    }
}

impl PrimaryMedium for WebLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, MediumError> {
        #[cfg(target_arch = "wasm32")]
        {
            imp::storage()?
                .get_item(key)
                .map_err(|e| imp::classify("get_item", e))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Err(unsupported())
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), MediumError> {
        #[cfg(target_arch = "wasm32")]
        {
            imp::storage()?
                .set_item(key, value)
                .map_err(|e| imp::classify("set_item", e))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Err(unsupported())
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), MediumError> {
        #[cfg(target_arch = "wasm32")]
        {
            imp::storage()?
                .remove_item(key)
                .map_err(|e| imp::classify("remove_item", e))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Err(unsupported())
        }
    }

    fn keys(&self) -> Result<Vec<String>, MediumError> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = imp::storage()?;
            let len = storage.length().map_err(|e| imp::classify("length", e))?;
            let mut keys = Vec::with_capacity(len as usize);
            for index in 0..len {
                if let Some(key) = storage.key(index).map_err(|e| imp::classify("key", e))? {
                    keys.push(key);
                }
            }
            Ok(keys)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Err(unsupported())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn unsupported() -> MediumError {
    MediumError::Unavailable("localStorage (wasm32 only)".to_string())
}
