//! Synchronous primary medium contract and adapters.
//!
//! The primary medium models `window.localStorage`: small, fast, synchronous, and liable to throw
//! on any call (quota exhaustion, private-browsing restrictions, disabled storage).

use std::{cell::RefCell, rc::Rc};

use super::MediumError;

/// Fast synchronous key/value medium with a small capacity.
pub trait PrimaryMedium {
    /// Reads the value stored under `key`. A missing key is `Ok(None)`.
    fn get_item(&self, key: &str) -> Result<Option<String>, MediumError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), MediumError>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), MediumError>;

    /// Lists stored keys, oldest insertion first.
    fn keys(&self) -> Result<Vec<String>, MediumError>;
}

fn unavailable() -> MediumError {
    MediumError::Unavailable("primary storage".to_string())
}

#[derive(Debug, Clone, Copy, Default)]
/// Primary medium for environments without one. Every call fails as unavailable.
pub struct NoopPrimaryMedium;

impl PrimaryMedium for NoopPrimaryMedium {
    fn get_item(&self, _key: &str) -> Result<Option<String>, MediumError> {
        Err(unavailable())
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), MediumError> {
        Err(unavailable())
    }

    fn remove_item(&self, _key: &str) -> Result<(), MediumError> {
        Err(unavailable())
    }

    fn keys(&self) -> Result<Vec<String>, MediumError> {
        Err(unavailable())
    }
}

#[derive(Debug, Default)]
struct MemoryPrimaryState {
    entries: Vec<(String, String)>,
    quota_bytes: Option<usize>,
    fail_reads: bool,
    fail_writes: bool,
    fail_removals: bool,
}

impl MemoryPrimaryState {
    fn used_bytes_with(&self, key: &str, value: &str) -> usize {
        let others: usize = self
            .entries
            .iter()
            .filter(|(k, _)| k != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        others + key.len() + value.len()
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory primary medium with an optional byte quota and injectable failures.
///
/// Clones share the same entries, so a test can keep a handle for inspection after moving
/// another into a store. Overwriting an existing key keeps its insertion position.
pub struct MemoryPrimaryMedium {
    inner: Rc<RefCell<MemoryPrimaryState>>,
}

impl MemoryPrimaryMedium {
    /// Creates a medium that rejects writes once keys plus values exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        let medium = Self::default();
        medium.inner.borrow_mut().quota_bytes = Some(quota_bytes);
        medium
    }

    /// Makes every read fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.borrow_mut().fail_reads = fail;
    }

    /// Makes every write fail as if the quota were exhausted.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Makes every removal fail.
    pub fn set_fail_removals(&self, fail: bool) {
        self.inner.borrow_mut().fail_removals = fail;
    }

    /// Returns the value stored under `key`, bypassing injected failures.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner
            .borrow()
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Returns stored keys in insertion order, bypassing injected failures.
    pub fn stored_keys(&self) -> Vec<String> {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }
}

impl PrimaryMedium for MemoryPrimaryMedium {
    fn get_item(&self, key: &str) -> Result<Option<String>, MediumError> {
        if self.inner.borrow().fail_reads {
            return Err(MediumError::Failed(format!("read of `{key}` rejected")));
        }
        Ok(self.peek(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), MediumError> {
        let mut state = self.inner.borrow_mut();
        if state.fail_writes {
            return Err(MediumError::QuotaExceeded(format!("write of `{key}` rejected")));
        }
        if let Some(quota) = state.quota_bytes {
            let needed = state.used_bytes_with(key, value);
            if needed > quota {
                return Err(MediumError::QuotaExceeded(format!(
                    "{needed} bytes exceeds quota of {quota}"
                )));
            }
        }
        match state.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => state.entries.push((key.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), MediumError> {
        let mut state = self.inner.borrow_mut();
        if state.fail_removals {
            return Err(MediumError::Failed(format!("removal of `{key}` rejected")));
        }
        state.entries.retain(|(k, _)| k != key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, MediumError> {
        if self.inner.borrow().fail_reads {
            return Err(MediumError::Failed("key enumeration rejected".to_string()));
        }
        Ok(self.stored_keys())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_primary_overwrite_keeps_insertion_position() {
        let medium = MemoryPrimaryMedium::default();
        medium.set_item("a", "1").expect("set a");
        medium.set_item("b", "2").expect("set b");
        medium.set_item("a", "3").expect("overwrite a");

        assert_eq!(medium.keys().expect("keys"), vec!["a", "b"]);
        assert_eq!(medium.get_item("a").expect("get"), Some("3".to_string()));
        medium.remove_item("a").expect("remove");
        assert_eq!(medium.get_item("a").expect("get"), None);
    }

    #[test]
    fn memory_primary_enforces_quota_counting_replaced_values_once() {
        let medium = MemoryPrimaryMedium::with_quota(10);
        medium.set_item("k", "12345").expect("fits");
        medium.set_item("k", "123456789").expect("replacement fits");

        let err = medium.set_item("x", "1").expect_err("over quota");
        assert!(err.is_quota_exceeded());
        assert_eq!(medium.peek("x"), None);
    }

    #[test]
    fn memory_primary_injected_failures_leave_entries_intact() {
        let medium = MemoryPrimaryMedium::default();
        medium.set_item("k", "v").expect("set");
        medium.set_fail_writes(true);
        medium.set_fail_reads(true);
        medium.set_fail_removals(true);

        assert!(medium.set_item("k", "other").is_err());
        assert!(medium.get_item("k").is_err());
        assert!(medium.keys().is_err());
        assert!(medium.remove_item("k").is_err());
        assert_eq!(medium.peek("k"), Some("v".to_string()));
    }

    #[test]
    fn noop_primary_is_always_unavailable() {
        let medium = NoopPrimaryMedium;
        let medium_obj: &dyn PrimaryMedium = &medium;
        assert!(matches!(
            medium_obj.get_item("k"),
            Err(MediumError::Unavailable(_))
        ));
        assert!(medium_obj.set_item("k", "v").is_err());
        assert!(medium_obj.remove_item("k").is_err());
        assert!(medium_obj.keys().is_err());
    }
}
