//! Loader module for catalog ingestion.
//!
//! Uploads batches to the staging index over a bounded pool of concurrent
//! tasks. Each task performs exactly one upload and reports exactly one
//! completion on a channel with a single consumer.

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, instrument};

use doofinder_repository::{BatchResult, IndexClient};
use doofinder_shared::Item;

/// Default number of concurrent uploads.
pub const DEFAULT_WORKERS: usize = 5;

/// Result of one batch upload, tagged with the batch's submission position.
#[derive(Debug)]
pub struct BatchCompletion {
    pub batch_number: usize,
    pub result: BatchResult,
}

/// Dispatches batch uploads with bounded concurrency.
pub struct BatchLoader {
    client: Arc<dyn IndexClient>,
    workers: usize,
}

impl BatchLoader {
    /// Create a loader allowing at most `workers` uploads in flight. A value
    /// of zero is treated as one.
    pub fn new(client: Arc<dyn IndexClient>, workers: usize) -> Self {
        Self {
            client,
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Spawn one upload task per batch and return the completion stream.
    ///
    /// Completions arrive in the order uploads finish, not the order batches
    /// were submitted. The channel closes once every task has finished. A
    /// failed upload does not stop the others.
    #[instrument(skip(self, batches), fields(batch_count = batches.len(), workers = self.workers))]
    pub fn dispatch(&self, index: &str, batches: Vec<Vec<Item>>) -> mpsc::Receiver<BatchCompletion> {
        let (tx, rx) = mpsc::channel(self.workers);
        let permits = Arc::new(Semaphore::new(self.workers));
        let index: Arc<str> = Arc::from(index);

        info!(index = %index, "Dispatching batch uploads");

        for (batch_number, batch) in batches.into_iter().enumerate() {
            let client = Arc::clone(&self.client);
            let permits = Arc::clone(&permits);
            let index = Arc::clone(&index);
            let tx = tx.clone();

            tokio::spawn(async move {
                // The semaphore is never closed.
                let Ok(_permit) = permits.acquire_owned().await else {
                    return;
                };

                debug!(batch_number, item_count = batch.len(), "Uploading batch");
                let result = client.ingest_batch(&index, batch).await;
                debug!(batch_number, succeeded = result.is_success(), "Batch finished");

                if tx.send(BatchCompletion { batch_number, result }).await.is_err() {
                    debug!(batch_number, "Completion receiver dropped");
                }
            });
        }

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use doofinder_repository::SearchServiceError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item {
                id: i.to_string(),
                title: format!("Product {i}"),
                description: String::new(),
                image_url: String::new(),
                link: String::new(),
                price: 0.0,
                categories: vec![],
                availability: "in stock".to_string(),
            })
            .collect()
    }

    /// Mock client that tracks how many uploads run at once.
    struct ConcurrencyProbe {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        calls: AtomicUsize,
    }

    impl ConcurrencyProbe {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IndexClient for ConcurrencyProbe {
        async fn create_temporary_index(&self, name: &str) -> Result<String, SearchServiceError> {
            Ok(format!("{name}_temp"))
        }

        async fn ingest_batch(&self, _index: &str, items: Vec<Item>) -> BatchResult {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(20)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            BatchResult::Succeeded {
                response: json!(items.iter().map(|i| json!({"id": i.id})).collect::<Vec<_>>()),
            }
        }

        async fn replace_index(&self, _temp: &str, _target: &str) -> Result<(), SearchServiceError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_dispatch_reports_every_batch() {
        let probe = Arc::new(ConcurrencyProbe::new());
        let loader = BatchLoader::new(probe.clone(), 3);

        let batches: Vec<Vec<Item>> = (0..10).map(|_| items(4)).collect();
        let mut rx = loader.dispatch("product_temp", batches);

        let mut seen = Vec::new();
        while let Some(completion) = rx.recv().await {
            assert_eq!(completion.result.accepted_count(), 4);
            seen.push(completion.batch_number);
        }

        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        assert_eq!(probe.calls.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_dispatch_respects_worker_bound() {
        let probe = Arc::new(ConcurrencyProbe::new());
        let loader = BatchLoader::new(probe.clone(), 2);

        let batches: Vec<Vec<Item>> = (0..8).map(|_| items(1)).collect();
        let mut rx = loader.dispatch("product_temp", batches);
        while rx.recv().await.is_some() {}

        let max = probe.max_in_flight.load(Ordering::SeqCst);
        assert!(max <= 2, "max in flight was {max}");
        assert!(max >= 1);
    }

    #[tokio::test]
    async fn test_dispatch_empty() {
        let loader = BatchLoader::new(Arc::new(ConcurrencyProbe::new()), 5);
        let mut rx = loader.dispatch("product_temp", Vec::new());
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_zero_workers_is_clamped() {
        let loader = BatchLoader::new(Arc::new(ConcurrencyProbe::new()), 0);
        assert_eq!(loader.workers(), 1);
    }
}
