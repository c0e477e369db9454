//! Device-local storage contracts shared by the durable store and its browser adapters.
//!
//! This crate is the API boundary for the two storage media the message log persists to. It
//! exposes the synchronous primary-medium contract, the asynchronous secondary-medium contract,
//! the optional usage estimator, the degraded-mode notice channel, and in-memory/no-op adapters
//! for tests and unsupported targets. Concrete browser adapters live in `disparu_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod media;
pub mod notifications;
pub mod time;

pub use media::primary::{MemoryPrimaryMedium, NoopPrimaryMedium, PrimaryMedium};
pub use media::secondary::{MemorySecondaryMedium, NoopSecondaryMedium, SecondaryMedium};
pub use media::usage::{NoopUsageEstimator, StaticUsageEstimator, StorageEstimate, UsageEstimator};
pub use media::{MediumError, MediumFuture};
pub use notifications::notice::{DegradedNotice, MemoryNoticeSink, NoopNoticeSink, NoticeSink};
pub use time::{unix_time_ms_now, MonotonicClock};
