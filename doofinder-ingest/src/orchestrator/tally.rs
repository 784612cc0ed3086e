//! Running totals for an ingestion run.

use tracing::{debug, warn};

use crate::report::{FailedBatch, IngestReport};
use doofinder_repository::BatchResult;

/// Snapshot of progress after a batch completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestProgress {
    pub batches_done: usize,
    pub batches_total: usize,
    pub success_count: usize,
    pub error_count: usize,
}

/// Aggregates batch results in completion order.
#[derive(Debug)]
pub struct IngestTally {
    batches_total: usize,
    batches_done: usize,
    success_count: usize,
    error_count: usize,
    failed: Vec<FailedBatch>,
}

impl IngestTally {
    pub fn new(batches_total: usize) -> Self {
        Self {
            batches_total,
            batches_done: 0,
            success_count: 0,
            error_count: 0,
            failed: Vec::new(),
        }
    }

    /// Fold one batch result into the totals.
    pub fn record(&mut self, result: BatchResult) -> IngestProgress {
        self.batches_done += 1;
        let accepted = result.accepted_count();
        let failed = result.failed_count();
        match result {
            BatchResult::Succeeded { response } => {
                if !response.is_array() {
                    warn!("Upload response is not a list; counting 0 accepted items");
                }
                self.success_count += accepted;
                debug!(accepted, done = self.batches_done, "Batch accepted");
            }
            BatchResult::Failed { error, items } => {
                self.error_count += failed;
                warn!(error = %error, items = failed, "Batch failed");
                self.failed.push(FailedBatch { error, items });
            }
        }
        self.progress()
    }

    pub fn progress(&self) -> IngestProgress {
        IngestProgress {
            batches_done: self.batches_done,
            batches_total: self.batches_total,
            success_count: self.success_count,
            error_count: self.error_count,
        }
    }

    pub fn batches_done(&self) -> usize {
        self.batches_done
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// The swap happens iff the service accepted at least one item.
    pub fn should_replace(&self) -> bool {
        self.success_count > 0
    }

    pub fn into_report(self, total_products: usize, temp: &str, target: &str) -> IngestReport {
        IngestReport {
            total_products,
            success_count: self.success_count,
            error_count: self.error_count,
            batch_count: self.batches_total,
            temporary_index: temp.to_string(),
            target_index: target.to_string(),
            replaced: false,
            failed_batches: self.failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_list_response_counts_zero() {
        let mut tally = IngestTally::new(1);
        let progress = tally.record(BatchResult::Succeeded {
            response: json!({"status": "ok"}),
        });
        assert_eq!(progress.success_count, 0);
        assert_eq!(progress.batches_done, 1);
        assert!(!tally.should_replace());
    }

    #[test]
    fn test_failed_batches_are_kept() {
        let mut tally = IngestTally::new(2);
        tally.record(BatchResult::Succeeded {
            response: json!([{"id": "1"}]),
        });
        tally.record(BatchResult::Failed {
            error: "timeout".to_string(),
            items: Vec::new(),
        });

        assert!(tally.should_replace());
        let report = tally.into_report(1, "product_temp", "product");
        assert_eq!(report.batch_count, 2);
        assert_eq!(report.failed_batches.len(), 1);
        assert_eq!(report.failed_batches[0].error, "timeout");
    }
}
