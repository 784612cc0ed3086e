//! Doofinder HTTP client implementation.
//!
//! This module provides the concrete implementation of `IndexClient` and
//! `QueryClient` on top of `reqwest`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::ServiceConfig;
use crate::doofinder::params::{self, new_session_id};
use crate::errors::SearchServiceError;
use crate::interfaces::{temporary_index_name, IndexClient, QueryClient};
use crate::types::BatchResult;
use doofinder_shared::{
    Item, SearchRequest, SearchResponse, SimilarRequest, Suggestion, SuggestRequest,
};

/// Longest response body kept in an error message.
const ERROR_BODY_LIMIT: usize = 500;

/// Doofinder client for one search engine.
///
/// # Example
///
/// ```ignore
/// use doofinder_repository::{DoofinderClient, ServiceConfig};
///
/// let config = ServiceConfig::new("abc123", "my-token").with_zone("eu1");
/// let client = DoofinderClient::new(config)?;
/// let temp = client.create_temporary_index("product").await?;
/// ```
pub struct DoofinderClient {
    http: reqwest::Client,
    root: Url,
    config: ServiceConfig,
}

impl DoofinderClient {
    /// Create a client from a validated configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(DoofinderClient)` - A new client instance
    /// * `Err(SearchServiceError::ConfigurationError)` - If the credentials,
    ///   zone, base URL or token header are unusable
    pub fn new(config: ServiceConfig) -> Result<Self, SearchServiceError> {
        let root = config.api_root()?;

        let mut auth = HeaderValue::from_str(&format!("Token {}", config.token))
            .map_err(|e| SearchServiceError::configuration(format!("Invalid token: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .user_agent(concat!("doofinder-catalog-tools/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchServiceError::configuration(e.to_string()))?;

        info!(
            root = %root,
            zone = %config.zone,
            "Created Doofinder client"
        );

        Ok(Self { http, root, config })
    }

    /// Build an endpoint URL below the engine root. Segments are
    /// percent-encoded individually.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SearchServiceError> {
        let mut url = self.root.clone();
        url.path_segments_mut()
            .map_err(|_| SearchServiceError::configuration("API root cannot have a path"))?
            .extend(segments);
        Ok(url)
    }

    /// Send a request and fail on any non-success status.
    async fn send(&self, request: RequestBuilder) -> Result<Response, SearchServiceError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
        Err(SearchServiceError::http(status.as_u16(), body))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, SearchServiceError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| SearchServiceError::parse(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &params::QueryParams,
    ) -> Result<T, SearchServiceError> {
        let url = self.endpoint(&[path])?;
        debug!(url = %url, params = query.len(), "Sending query");
        self.send_json(self.http.get(url).query(query)).await
    }

    async fn post_items(&self, index: &str, items: &[Item]) -> Result<Value, SearchServiceError> {
        let url = self.endpoint(&["items", index])?;
        let request = self
            .http
            .post(url)
            .json(items)
            .timeout(self.config.upload_timeout);
        self.send_json(request).await
    }
}

#[async_trait]
impl IndexClient for DoofinderClient {
    #[instrument(skip(self))]
    async fn create_temporary_index(&self, name: &str) -> Result<String, SearchServiceError> {
        let temp = temporary_index_name(name);
        let url = self.endpoint(&["indices", &temp])?;

        self.send(self.http.post(url)).await?;

        info!(index = %temp, "Created temporary index");
        Ok(temp)
    }

    #[instrument(skip(self, items), fields(item_count = items.len()))]
    async fn ingest_batch(&self, index: &str, items: Vec<Item>) -> BatchResult {
        match self.post_items(index, &items).await {
            Ok(response) => {
                debug!("Batch uploaded");
                BatchResult::Succeeded { response }
            }
            Err(e) => {
                warn!(error = %e, "Batch upload failed");
                BatchResult::Failed {
                    error: e.to_string(),
                    items,
                }
            }
        }
    }

    #[instrument(skip(self))]
    async fn replace_index(&self, temp: &str, target: &str) -> Result<(), SearchServiceError> {
        let url = self.endpoint(&["indices", temp, "replace", target])?;

        self.send(self.http.post(url)).await?;

        info!(temp = %temp, target = %target, "Replaced index");
        Ok(())
    }
}

#[async_trait]
impl QueryClient for DoofinderClient {
    #[instrument(skip(self, request), fields(query = %request.query, page = request.page))]
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchServiceError> {
        let query = params::search_params(request, &new_session_id());
        self.get_json("_search", &query).await
    }

    #[instrument(skip(self, request), fields(query = %request.query))]
    async fn suggest(&self, request: &SuggestRequest) -> Result<Vec<Suggestion>, SearchServiceError> {
        let query = params::suggest_params(request, &new_session_id());
        self.get_json("_suggest", &query).await
    }

    #[instrument(skip(self, request), fields(product_id = %request.product_id))]
    async fn similar_products(
        &self,
        request: &SimilarRequest,
    ) -> Result<SearchResponse, SearchServiceError> {
        if request.product_id.trim().is_empty() {
            return Err(SearchServiceError::invalid_parameter("product id is required"));
        }
        let query = params::similar_params(request, &new_session_id());
        self.get_json("_visually_similar", &query).await
    }
}
