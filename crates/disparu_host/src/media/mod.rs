//! Storage medium contracts and the error type they share.

pub mod primary;
pub mod secondary;
pub mod usage;

use std::{future::Future, pin::Pin};

use thiserror::Error;

/// Object-safe boxed future used by asynchronous medium methods.
pub type MediumFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure reported by a single storage medium.
pub enum MediumError {
    /// The medium is not supported or could not be opened in this environment.
    #[error("{0} is unavailable")]
    Unavailable(String),
    /// The medium rejected a write because its capacity is exhausted.
    #[error("storage quota exceeded: {0}")]
    QuotaExceeded(String),
    /// Any other read, write, or removal failure.
    #[error("storage operation failed: {0}")]
    Failed(String),
}

impl MediumError {
    /// Returns `true` for quota rejections.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded(_))
    }
}
