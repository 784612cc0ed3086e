//! Query benchmark runner.
//!
//! Replays a file of queries against the search endpoint and records the
//! ids returned for each one, for offline relevance comparison.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use doofinder_repository::QueryClient;
use doofinder_shared::SearchRequest;

/// Results requested per query.
pub const DEFAULT_COUNT: u32 = 25;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkQuery {
    /// Opaque identifier, echoed back in the results.
    pub query_id: Value,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    pub query_id: Value,
    pub query: String,
    /// Result ids in rank order.
    pub response: Vec<String>,
}

/// Run every query in order. The first failing query aborts the run.
pub async fn run_benchmark<F>(
    client: &dyn QueryClient,
    queries: &[BenchmarkQuery],
    count: u32,
    mut on_query: F,
) -> Result<Vec<BenchmarkResult>>
where
    F: FnMut(&BenchmarkResult),
{
    info!(queries = queries.len(), count, "Starting benchmark");

    let mut results = Vec::with_capacity(queries.len());
    for query in queries {
        let request = SearchRequest::new(&query.query).with_rpp(count);
        let response = client
            .search(&request)
            .await
            .with_context(|| format!("Query {} ({:?}) failed", query.query_id, query.query))?;

        debug!(query = %query.query, hits = response.results.len(), "Query completed");
        let result = BenchmarkResult {
            query_id: query.query_id.clone(),
            query: query.query.clone(),
            response: response.ids(),
        };
        on_query(&result);
        results.push(result);
    }

    Ok(results)
}

pub async fn load_queries(path: impl AsRef<Path>) -> Result<Vec<BenchmarkQuery>> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse queries from {}", path.display()))
}

pub async fn save_results(path: impl AsRef<Path>, results: &[BenchmarkResult]) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(results)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write results to {}", path.display()))
}
