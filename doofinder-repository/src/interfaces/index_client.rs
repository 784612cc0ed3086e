//! Index management trait definition.

use async_trait::async_trait;

use crate::errors::SearchServiceError;
use crate::types::BatchResult;
use doofinder_shared::Item;

/// Suffix appended to a base index name to form its staging index.
pub const TEMP_INDEX_SUFFIX: &str = "_temp";

/// Name of the staging index for `name`.
pub fn temporary_index_name(name: &str) -> String {
    format!("{name}{TEMP_INDEX_SUFFIX}")
}

/// Operations used by bulk ingestion.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one client is shared by every
/// upload task.
#[async_trait]
pub trait IndexClient: Send + Sync {
    /// Create the staging index `{name}_temp` and return its name.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The temporary index name
    /// * `Err(SearchServiceError)` - If the service rejected the request
    async fn create_temporary_index(&self, name: &str) -> Result<String, SearchServiceError>;

    /// Upload one batch of items to `index`.
    ///
    /// Never fails: transport errors, timeouts and non-success statuses are
    /// captured as [`BatchResult::Failed`] together with the original items.
    async fn ingest_batch(&self, index: &str, items: Vec<Item>) -> BatchResult;

    /// Swap `temp` into the place of `target`.
    ///
    /// A failure leaves the already uploaded data in `temp`.
    async fn replace_index(&self, temp: &str, target: &str) -> Result<(), SearchServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_index_name() {
        assert_eq!(temporary_index_name("product"), "product_temp");
    }
}
