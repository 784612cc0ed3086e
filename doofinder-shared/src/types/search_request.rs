//! Query request types for the search, suggest and similarity endpoints.

use super::search_params::{FacetSpec, Filters, QueryName, SortEntry};

/// Default page number for searches.
pub const DEFAULT_PAGE: u32 = 1;

/// Default results per page for searches.
pub const DEFAULT_SEARCH_RPP: u32 = 20;

/// Default results per page for similarity lookups.
pub const DEFAULT_SIMILAR_RPP: u32 = 10;

/// Full-text search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Search terms.
    pub query: String,
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub rpp: u32,
    /// Indices to restrict the search to. Empty searches all indices.
    pub indices: Vec<String>,
    pub filters: Filters,
    pub sort: Vec<SortEntry>,
    pub facets: Vec<FacetSpec>,
    pub query_name: Option<QueryName>,
}

impl SearchRequest {
    /// Create a search for `query` with default paging and no refinements.
    ///
    /// # Example
    ///
    /// ```
    /// use doofinder_shared::{SearchRequest, SortEntry};
    ///
    /// let request = SearchRequest::new("running shoes")
    ///     .with_page(2)
    ///     .with_sort(vec![SortEntry::asc("price")]);
    /// assert_eq!(request.rpp, 20);
    /// ```
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: DEFAULT_PAGE,
            rpp: DEFAULT_SEARCH_RPP,
            indices: Vec::new(),
            filters: Filters::new(),
            sort: Vec::new(),
            facets: Vec::new(),
            query_name: None,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_rpp(mut self, rpp: u32) -> Self {
        self.rpp = rpp;
        self
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.indices.push(index.into());
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: Vec<SortEntry>) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_facets(mut self, facets: Vec<FacetSpec>) -> Self {
        self.facets = facets;
        self
    }

    pub fn with_query_name(mut self, query_name: QueryName) -> Self {
        self.query_name = Some(query_name);
        self
    }
}

/// Suggestion request.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestRequest {
    pub query: String,
    pub indices: Vec<String>,
}

impl SuggestRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            indices: Vec::new(),
        }
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.indices.push(index.into());
        self
    }
}

/// Visual similarity request for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarRequest {
    /// Remote id of the reference product.
    pub product_id: String,
    pub rpp: u32,
    /// Leave the reference product out of the results.
    pub exclude_self: bool,
    pub filters: Filters,
}

impl SimilarRequest {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            rpp: DEFAULT_SIMILAR_RPP,
            exclude_self: true,
            filters: Filters::new(),
        }
    }

    pub fn with_rpp(mut self, rpp: u32) -> Self {
        self.rpp = rpp;
        self
    }

    pub fn with_exclude_self(mut self, exclude_self: bool) -> Self {
        self.exclude_self = exclude_self;
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }
}
