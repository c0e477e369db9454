//! Asynchronous secondary medium contract and adapters.
//!
//! The secondary medium models one IndexedDB object store: larger capacity, asynchronous, and
//! only usable after an `open` that may fail (unsupported browser, permission denial).

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::{MediumError, MediumFuture};

/// Larger-capacity asynchronous key/value medium scoped to one named collection.
pub trait SecondaryMedium {
    /// Opens the backing collection. Must succeed before `get` or `put` can.
    fn open<'a>(&'a self) -> MediumFuture<'a, Result<(), MediumError>>;

    /// Reads the value stored under `key`. A missing key is `Ok(None)`.
    fn get<'a>(&'a self, key: &'a str) -> MediumFuture<'a, Result<Option<String>, MediumError>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn put<'a>(&'a self, key: &'a str, value: &'a str) -> MediumFuture<'a, Result<(), MediumError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Secondary medium for environments without one. Opening always fails.
pub struct NoopSecondaryMedium;

impl SecondaryMedium for NoopSecondaryMedium {
    fn open<'a>(&'a self) -> MediumFuture<'a, Result<(), MediumError>> {
        Box::pin(async { Err(MediumError::Unavailable("secondary storage".to_string())) })
    }

    fn get<'a>(&'a self, _key: &'a str) -> MediumFuture<'a, Result<Option<String>, MediumError>> {
        Box::pin(async { Err(MediumError::Unavailable("secondary storage".to_string())) })
    }

    fn put<'a>(
        &'a self,
        _key: &'a str,
        _value: &'a str,
    ) -> MediumFuture<'a, Result<(), MediumError>> {
        Box::pin(async { Err(MediumError::Unavailable("secondary storage".to_string())) })
    }
}

#[derive(Debug, Default)]
struct MemorySecondaryState {
    records: HashMap<String, String>,
    opened: bool,
    fail_open: bool,
    fail_reads: bool,
    fail_writes: bool,
}

#[derive(Debug, Clone, Default)]
/// In-memory secondary medium with injectable failures.
///
/// Records survive across clones and across re-opening, which lets a test build a fresh store
/// over the same data to simulate the next launch.
pub struct MemorySecondaryMedium {
    inner: Rc<RefCell<MemorySecondaryState>>,
}

impl MemorySecondaryMedium {
    /// Makes `open` fail.
    pub fn set_fail_open(&self, fail: bool) {
        self.inner.borrow_mut().fail_open = fail;
    }

    /// Makes every read fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.borrow_mut().fail_reads = fail;
    }

    /// Makes every write fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Returns the record stored under `key`, bypassing open state and injected failures.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.borrow().records.get(key).cloned()
    }

    fn check_open(&self) -> Result<(), MediumError> {
        if self.inner.borrow().opened {
            Ok(())
        } else {
            Err(MediumError::Unavailable(
                "secondary storage (not opened)".to_string(),
            ))
        }
    }
}

impl SecondaryMedium for MemorySecondaryMedium {
    fn open<'a>(&'a self) -> MediumFuture<'a, Result<(), MediumError>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            if state.fail_open {
                return Err(MediumError::Unavailable(
                    "secondary storage (open denied)".to_string(),
                ));
            }
            state.opened = true;
            Ok(())
        })
    }

    fn get<'a>(&'a self, key: &'a str) -> MediumFuture<'a, Result<Option<String>, MediumError>> {
        Box::pin(async move {
            self.check_open()?;
            let state = self.inner.borrow();
            if state.fail_reads {
                return Err(MediumError::Failed(format!("read of `{key}` rejected")));
            }
            Ok(state.records.get(key).cloned())
        })
    }

    fn put<'a>(&'a self, key: &'a str, value: &'a str) -> MediumFuture<'a, Result<(), MediumError>> {
        Box::pin(async move {
            self.check_open()?;
            let mut state = self.inner.borrow_mut();
            if state.fail_writes {
                return Err(MediumError::Failed(format!("write of `{key}` rejected")));
            }
            state.records.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_secondary_requires_open_before_use() {
        let medium = MemorySecondaryMedium::default();
        let medium_obj: &dyn SecondaryMedium = &medium;

        assert!(block_on(medium_obj.put("k", "v")).is_err());
        block_on(medium_obj.open()).expect("open");
        block_on(medium_obj.put("k", "v")).expect("put");
        assert_eq!(
            block_on(medium_obj.get("k")).expect("get"),
            Some("v".to_string())
        );
        assert_eq!(block_on(medium_obj.get("missing")).expect("get"), None);
    }

    #[test]
    fn memory_secondary_clones_share_records() {
        let medium = MemorySecondaryMedium::default();
        block_on(medium.open()).expect("open");
        block_on(medium.put("k", "v")).expect("put");

        let next_launch = medium.clone();
        block_on(next_launch.open()).expect("reopen");
        assert_eq!(
            block_on(next_launch.get("k")).expect("get"),
            Some("v".to_string())
        );
    }

    #[test]
    fn memory_secondary_open_failure_is_unavailable() {
        let medium = MemorySecondaryMedium::default();
        medium.set_fail_open(true);
        assert!(matches!(
            block_on(medium.open()),
            Err(MediumError::Unavailable(_))
        ));
        assert!(block_on(medium.get("k")).is_err());
    }

    #[test]
    fn noop_secondary_never_opens() {
        let medium = NoopSecondaryMedium;
        assert!(block_on(medium.open()).is_err());
        assert!(block_on(medium.get("k")).is_err());
        assert!(block_on(medium.put("k", "v")).is_err());
    }
}
