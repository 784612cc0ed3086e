//! Run report for catalog ingestion.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::errors::IngestError;
use doofinder_shared::Item;

/// One batch the service did not accept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedBatch {
    /// Error text from the upload attempt.
    pub error: String,
    /// The items that were not uploaded.
    pub items: Vec<Item>,
}

impl FailedBatch {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Final outcome of an ingestion run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestReport {
    /// Number of items transformed and submitted.
    pub total_products: usize,
    /// Items the service reported as created.
    pub success_count: usize,
    /// Items in batches that failed to upload.
    pub error_count: usize,
    pub batch_count: usize,
    pub temporary_index: String,
    pub target_index: String,
    /// Whether the staging index was swapped into place.
    pub replaced: bool,
    /// Failed batches in completion order.
    pub failed_batches: Vec<FailedBatch>,
}

impl IngestReport {
    /// Plain-text summary followed by one block per failed batch.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Total products: {}", self.total_products);
        let _ = writeln!(out, "Successful imports: {}", self.success_count);
        let _ = writeln!(out, "Failed imports: {}", self.error_count);

        if !self.failed_batches.is_empty() {
            let _ = writeln!(out, "\nError details:");
            for batch in &self.failed_batches {
                let _ = writeln!(out, "\nError: {}", batch.error);
                let _ = writeln!(out, "Failed products in batch: {}", batch.item_count());
            }
        }

        out
    }

    /// Write the report, failed items included, as pretty JSON.
    pub async fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IngestError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| IngestError::report(format!("Failed to serialize report: {e}")))?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| IngestError::report(format!("Failed to write {}: {e}", path.display())))
    }
}
