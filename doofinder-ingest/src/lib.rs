//! # Doofinder Ingest
//!
//! Bulk catalog ingestion into a Doofinder index.
//!
//! ## Architecture
//!
//! The ingest follows a load-transform-upload-swap flow:
//!
//! 1. **Catalog**: Reads the product export from disk
//! 2. **Processor**: Transforms catalog records into index items
//! 3. **Batcher**: Partitions items into fixed-size batches
//! 4. **Loader**: Uploads batches concurrently over a bounded worker pool
//! 5. **Orchestrator**: Creates the temporary index, aggregates batch
//!    results and swaps the index when anything was uploaded

pub mod batcher;
pub mod catalog;
pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod processor;
pub mod report;

pub use errors::{IngestError, TransformError};
pub use orchestrator::{IngestConfig, IngestEvent, IngestOrchestrator, IngestProgress};
pub use report::{FailedBatch, IngestReport};
