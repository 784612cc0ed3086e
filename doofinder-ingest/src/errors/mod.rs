//! Error types for catalog ingestion.

use doofinder_repository::SearchServiceError;
use thiserror::Error;

use crate::report::IngestReport;

/// Errors raised while transforming a single catalog record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// A required field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

/// Errors that abort an ingestion run.
///
/// Per-batch upload failures are not represented here; they are recorded in
/// the run's [`IngestReport`] and the run continues.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The catalog file could not be read or parsed.
    #[error("Catalog error: {0}")]
    CatalogError(String),

    /// A catalog record could not be transformed.
    #[error("Product at position {position}: {source}")]
    TransformError {
        position: usize,
        #[source]
        source: TransformError,
    },

    /// Invalid run settings.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The staging index could not be created; nothing was uploaded.
    #[error("Failed to create temporary index: {0}")]
    IndexCreationError(#[source] SearchServiceError),

    /// The staging index could not be swapped in. Uploaded data remains in
    /// the staging index.
    #[error("Failed to replace index {target} with {temp_index} (data remains in {temp_index}): {source}")]
    IndexReplaceError {
        temp_index: String,
        target: String,
        #[source]
        source: SearchServiceError,
        /// Upload results gathered before the failed swap.
        report: Box<IngestReport>,
    },

    /// Upload tasks ended without reporting a result.
    #[error("Loader error: {0}")]
    LoaderError(String),

    /// The run report could not be written.
    #[error("Report error: {0}")]
    ReportError(String),
}

impl IngestError {
    /// Create a catalog error.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::CatalogError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a loader error.
    pub fn loader(msg: impl Into<String>) -> Self {
        Self::LoaderError(msg.into())
    }

    /// Create a report error.
    pub fn report(msg: impl Into<String>) -> Self {
        Self::ReportError(msg.into())
    }
}
