//! Failures the message log handles internally.

use disparu_host::DegradedNotice;
use disparu_storage::StorageUnavailable;
use thiserror::Error;

#[derive(Debug, Error)]
/// A stored blob is not valid for its record type. Handled by substituting defaults.
pub enum ParseFailure {
    /// The blob is not valid JSON, or not the expected shape.
    #[error("stored `{key}` is malformed: {source}")]
    Malformed {
        /// Storage key the blob was read from.
        key: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The blob is valid JSON but not an object.
    #[error("stored `{key}` is not a JSON object")]
    NotAnObject {
        /// Storage key the blob was read from.
        key: String,
    },
}

#[derive(Debug, Error)]
/// A record could not be saved. Reported as a [`DegradedNotice`], never raised.
pub enum PersistFailure {
    /// The durable store could not accept the write.
    #[error(transparent)]
    Storage(#[from] StorageUnavailable),
    /// The record could not be serialized.
    #[error("could not serialize `{key}`: {source}")]
    Encode {
        /// Storage key the record was destined for.
        key: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl PersistFailure {
    /// Notice shown for this failure.
    pub fn notice(&self) -> DegradedNotice {
        match self {
            Self::Storage(StorageUnavailable::NoMedium) => DegradedNotice::Unavailable,
            Self::Storage(StorageUnavailable::WriteRejected(_)) | Self::Encode { .. } => {
                DegradedNotice::WriteFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_follow_failure_kind() {
        assert_eq!(
            PersistFailure::from(StorageUnavailable::NoMedium).notice(),
            DegradedNotice::Unavailable
        );
        assert_eq!(
            PersistFailure::from(StorageUnavailable::WriteRejected("full".to_string())).notice(),
            DegradedNotice::WriteFailed
        );
    }
}
