//! Best-effort storage usage estimation.

use serde::{Deserialize, Serialize};

use super::{MediumError, MediumFuture};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Used and total bytes reported by the environment for this origin.
pub struct StorageEstimate {
    /// Bytes currently used.
    pub usage_bytes: u64,
    /// Bytes available in total.
    pub quota_bytes: u64,
}

impl StorageEstimate {
    /// Formats the estimate as `"{percent}% of {quota}MB"`.
    ///
    /// Returns `None` when either figure is zero.
    pub fn describe(&self) -> Option<String> {
        if self.usage_bytes == 0 || self.quota_bytes == 0 {
            return None;
        }
        let percent = (self.usage_bytes as f64 / self.quota_bytes as f64 * 100.0).round() as u64;
        let quota_mb = (self.quota_bytes as f64 / 1024.0 / 1024.0).round() as u64;
        Some(format!("{percent}% of {quota_mb}MB"))
    }
}

/// Optional environment service reporting how much storage the origin uses.
pub trait UsageEstimator {
    /// Queries the current estimate. `Ok(None)` means the environment cannot tell.
    fn estimate<'a>(&'a self) -> MediumFuture<'a, Result<Option<StorageEstimate>, MediumError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Estimator for environments without a storage-estimate API.
pub struct NoopUsageEstimator;

impl UsageEstimator for NoopUsageEstimator {
    fn estimate<'a>(&'a self) -> MediumFuture<'a, Result<Option<StorageEstimate>, MediumError>> {
        Box::pin(async { Ok(None) })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Estimator returning a fixed answer.
pub struct StaticUsageEstimator(pub Option<StorageEstimate>);

impl UsageEstimator for StaticUsageEstimator {
    fn estimate<'a>(&'a self) -> MediumFuture<'a, Result<Option<StorageEstimate>, MediumError>> {
        let estimate = self.0;
        Box::pin(async move { Ok(estimate) })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn describe_rounds_percent_and_megabytes() {
        let estimate = StorageEstimate {
            usage_bytes: 1_572_864,
            quota_bytes: 10 * 1024 * 1024,
        };
        assert_eq!(estimate.describe().as_deref(), Some("15% of 10MB"));
    }

    #[test]
    fn describe_skips_zero_figures() {
        let empty = StorageEstimate {
            usage_bytes: 0,
            quota_bytes: 1024,
        };
        assert_eq!(empty.describe(), None);
        assert_eq!(StorageEstimate::default().describe(), None);
    }

    #[test]
    fn static_and_noop_estimators_report_their_values() {
        let estimate = StorageEstimate {
            usage_bytes: 1,
            quota_bytes: 2,
        };
        let fixed = StaticUsageEstimator(Some(estimate));
        let fixed_obj: &dyn UsageEstimator = &fixed;
        assert_eq!(block_on(fixed_obj.estimate()).expect("estimate"), Some(estimate));
        assert_eq!(block_on(NoopUsageEstimator.estimate()).expect("estimate"), None);
    }
}
