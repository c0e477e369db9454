//! `navigator.storage.estimate()`-backed usage estimator.

use disparu_host::{MediumError, MediumFuture, StorageEstimate, UsageEstimator};

#[derive(Debug, Clone, Copy, Default)]
/// Usage estimator backed by the Storage API.
pub struct WebStorageEstimator;

impl UsageEstimator for WebStorageEstimator {
    fn estimate<'a>(&'a self) -> MediumFuture<'a, Result<Option<StorageEstimate>, MediumError>> {
        Box::pin(async move {
            crate::bridge::storage_estimate()
                .await
                .map_err(MediumError::Failed)
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_estimator_has_no_estimate() {
        let estimator = WebStorageEstimator;
        let estimator_obj: &dyn UsageEstimator = &estimator;
        assert_eq!(block_on(estimator_obj.estimate()).expect("estimate"), None);
    }
}
