//! Result types for index operations.

use serde_json::Value;

use doofinder_shared::Item;

/// Outcome of uploading one batch.
///
/// A batch either succeeded and carries the service response, or failed and
/// carries the error text together with the items it tried to upload, so the
/// caller can report or retry them.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchResult {
    Succeeded { response: Value },
    Failed { error: String, items: Vec<Item> },
}

impl BatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Number of items the service reported as created.
    ///
    /// The items endpoint answers with one entry per accepted item. Any other
    /// payload shape counts as zero.
    pub fn accepted_count(&self) -> usize {
        match self {
            Self::Succeeded {
                response: Value::Array(entries),
            } => entries.len(),
            _ => 0,
        }
    }

    /// Number of items in a failed batch.
    pub fn failed_count(&self) -> usize {
        match self {
            Self::Failed { items, .. } => items.len(),
            Self::Succeeded { .. } => 0,
        }
    }
}
