//! Object-safe key/value contract consumed by the message log.

use std::{future::Future, pin::Pin};

use crate::{DurableKvStore, StorageStatus, StorageUnavailable};

/// Object-safe boxed future used by [`KvStore`] async methods.
pub type KvFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Async string key/value storage that hides which medium served a call.
pub trait KvStore {
    /// Reads `key`. `None` covers both "never stored" and "unreadable".
    fn get<'a>(&'a self, key: &'a str) -> KvFuture<'a, Option<String>>;

    /// Writes `value` under `key`.
    fn set<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KvFuture<'a, Result<(), StorageUnavailable>>;

    /// Returns a non-blocking status snapshot.
    fn describe_status(&self) -> StorageStatus;
}

impl KvStore for DurableKvStore {
    fn get<'a>(&'a self, key: &'a str) -> KvFuture<'a, Option<String>> {
        Box::pin(DurableKvStore::get(self, key))
    }

    fn set<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KvFuture<'a, Result<(), StorageUnavailable>> {
        Box::pin(DurableKvStore::set(self, key, value))
    }

    fn describe_status(&self) -> StorageStatus {
        DurableKvStore::describe_status(self)
    }
}
