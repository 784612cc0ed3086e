//! Orchestrator module for catalog ingestion.
//!
//! Coordinates the processor, batcher and loader components and decides
//! whether the staging index replaces the production index.

mod tally;

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::batcher::{self, DEFAULT_BATCH_SIZE};
use crate::errors::IngestError;
use crate::loader::{BatchLoader, DEFAULT_WORKERS};
use crate::processor;
use crate::report::IngestReport;
use doofinder_repository::IndexClient;
use doofinder_shared::CatalogRecord;

pub use tally::{IngestProgress, IngestTally};

/// Default production index name.
pub const DEFAULT_INDEX: &str = "product";

/// Configuration for an ingestion run.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Production index to replace.
    pub index: String,
    /// Maximum concurrent uploads.
    pub workers: usize,
    /// Items per upload batch.
    pub batch_size: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            index: DEFAULT_INDEX.to_string(),
            workers: DEFAULT_WORKERS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl IngestConfig {
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.index.trim().is_empty() {
            return Err(IngestError::config("index name is required"));
        }
        if self.workers == 0 {
            return Err(IngestError::config("workers must be greater than zero"));
        }
        if self.batch_size == 0 {
            return Err(IngestError::config("batch size must be greater than zero"));
        }
        Ok(())
    }
}

/// Milestones of a run, delivered to the caller's observer.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestEvent<'a> {
    Started { products: usize, batches: usize },
    TemporaryIndexCreated { index: &'a str },
    BatchCompleted(IngestProgress),
    ReplacingIndex { temp: &'a str, target: &'a str },
    IndexReplaced { target: &'a str },
    /// No batch succeeded; the staging index is left in place.
    ReplacementSkipped { temp: &'a str },
}

/// Runs the create, upload, swap sequence.
///
/// The orchestrator:
/// - Transforms and partitions the catalog
/// - Creates the staging index
/// - Uploads every batch and aggregates results as they complete
/// - Replaces the production index when at least one item was accepted
pub struct IngestOrchestrator {
    client: Arc<dyn IndexClient>,
    config: IngestConfig,
}

impl IngestOrchestrator {
    /// Create an orchestrator with default configuration.
    pub fn new(client: Arc<dyn IndexClient>) -> Self {
        Self {
            client,
            config: IngestConfig::default(),
        }
    }

    /// Create an orchestrator with custom configuration.
    pub fn with_config(client: Arc<dyn IndexClient>, config: IngestConfig) -> Self {
        Self { client, config }
    }

    /// Run a full ingestion of `products`.
    ///
    /// Setup failures (invalid config, a record without title, staging index
    /// creation) abort before any upload. Batch failures are recorded in the
    /// report. A failed swap returns [`IngestError::IndexReplaceError`]
    /// carrying the report.
    #[instrument(skip(self, products, observer), fields(index = %self.config.index))]
    pub async fn run<F>(
        &self,
        products: Vec<CatalogRecord>,
        mut observer: F,
    ) -> Result<IngestReport, IngestError>
    where
        F: FnMut(IngestEvent<'_>),
    {
        self.config.validate()?;

        let items = processor::transform_all(products)?;
        let total_products = items.len();
        let batches = batcher::partition(items, self.config.batch_size)?;
        let batch_count = batches.len();

        info!(
            products = total_products,
            batches = batch_count,
            workers = self.config.workers,
            "Starting import"
        );
        observer(IngestEvent::Started {
            products: total_products,
            batches: batch_count,
        });

        let temp = self
            .client
            .create_temporary_index(&self.config.index)
            .await
            .map_err(IngestError::IndexCreationError)?;
        observer(IngestEvent::TemporaryIndexCreated { index: &temp });

        let loader = BatchLoader::new(Arc::clone(&self.client), self.config.workers);
        let mut completions = loader.dispatch(&temp, batches);

        let mut tally = IngestTally::new(batch_count);
        while let Some(completion) = completions.recv().await {
            let progress = tally.record(completion.result);
            debug!(
                batch_number = completion.batch_number,
                done = progress.batches_done,
                total = progress.batches_total,
                "Batch completed"
            );
            observer(IngestEvent::BatchCompleted(progress));
        }

        if tally.batches_done() != batch_count {
            return Err(IngestError::loader(format!(
                "{} of {} upload tasks ended without reporting a result",
                batch_count - tally.batches_done(),
                batch_count
            )));
        }

        info!(
            success = tally.success_count(),
            errors = tally.error_count(),
            "All batches completed"
        );

        let replace = tally.should_replace();
        let mut report = tally.into_report(total_products, &temp, &self.config.index);

        if replace {
            observer(IngestEvent::ReplacingIndex {
                temp: &temp,
                target: &self.config.index,
            });
            if let Err(source) = self.client.replace_index(&temp, &self.config.index).await {
                return Err(IngestError::IndexReplaceError {
                    temp_index: temp,
                    target: self.config.index.clone(),
                    source,
                    report: Box::new(report),
                });
            }
            report.replaced = true;
            observer(IngestEvent::IndexReplaced {
                target: &self.config.index,
            });
        } else {
            warn!(temp = %temp, "No items were accepted; skipping index replacement");
            observer(IngestEvent::ReplacementSkipped { temp: &temp });
        }

        Ok(report)
    }
}
