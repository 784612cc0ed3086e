//! Query trait definition.

use async_trait::async_trait;

use crate::errors::SearchServiceError;
use doofinder_shared::{SearchRequest, SearchResponse, SimilarRequest, Suggestion, SuggestRequest};

/// Read-side operations against a search engine.
///
/// Every call is a single request with no retry; a non-success response is
/// returned as an error immediately.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Run a full-text search.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchServiceError>;

    /// Fetch query suggestions.
    async fn suggest(&self, request: &SuggestRequest) -> Result<Vec<Suggestion>, SearchServiceError>;

    /// Find products visually similar to `request.product_id`.
    async fn similar_products(
        &self,
        request: &SimilarRequest,
    ) -> Result<SearchResponse, SearchServiceError>;
}
