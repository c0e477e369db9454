//! Durable key/value storage over two device-local media with automatic failover.
//!
//! [`DurableKvStore`] writes to a fast synchronous primary medium (`localStorage`), cleans up and
//! retries once when that write is rejected, and falls back to an asynchronous secondary medium
//! (IndexedDB) when the primary path is exhausted. Medium failures stay inside the store as
//! capability flags; only total exhaustion crosses the boundary as [`StorageUnavailable`].
//!
//! # Example
//!
//! ```rust
//! use disparu_host::{MemoryPrimaryMedium, MemorySecondaryMedium};
//! use disparu_storage::{DurableKvStore, DurableStoreConfig, StorageCapability};
//! use futures::executor::block_on;
//!
//! let store = DurableKvStore::new(
//!     MemoryPrimaryMedium::default(),
//!     MemorySecondaryMedium::default(),
//!     DurableStoreConfig::default(),
//! );
//! block_on(store.initialize());
//! assert_eq!(store.capability(), StorageCapability::PrimaryAndSecondary);
//!
//! block_on(store.set("messages_app_settings", "{}")).expect("primary accepts the write");
//! assert_eq!(
//!     block_on(store.get("messages_app_settings")),
//!     Some("{}".to_string())
//! );
//! ```

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod durable;
pub mod error;
mod host_adapters;
pub mod kv;
pub mod status;

pub use config::{DurableStoreConfig, DEFAULT_NAMESPACE_PREFIX};
pub use durable::DurableKvStore;
pub use error::{ConfigError, StorageUnavailable};
pub use host_adapters::browser_store;
pub use kv::{KvFuture, KvStore};
pub use status::{StorageCapability, StorageStatus, StorePhase};
