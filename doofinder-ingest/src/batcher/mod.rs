//! Batch partitioning.

use crate::errors::IngestError;

/// Default number of items per upload batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Split `items` into contiguous batches of at most `batch_size`, keeping
/// order. Only the last batch may be shorter.
pub fn partition<T>(items: Vec<T>, batch_size: usize) -> Result<Vec<Vec<T>>, IngestError> {
    if batch_size == 0 {
        return Err(IngestError::config("batch size must be greater than zero"));
    }

    let mut batches = Vec::with_capacity(items.len().div_ceil(batch_size));
    let mut iter = items.into_iter();
    loop {
        let batch: Vec<T> = iter.by_ref().take(batch_size).collect();
        if batch.is_empty() {
            break;
        }
        batches.push(batch);
    }

    Ok(batches)
}
