//! # Doofinder Shared
//!
//! Data structures shared by the Doofinder catalog tools: the loosely-typed
//! catalog record read from disk, the fixed-shape item uploaded to the
//! remote index, and the typed query parameters and responses used by the
//! search client.

pub mod types;

pub use types::catalog_record::CatalogRecord;
pub use types::item::{Item, AVAILABILITY_IN_STOCK};
pub use types::search_params::{
    FacetSpec, FilterSpec, Filters, ParamError, QueryName, SortEntry, SortOrder,
};
pub use types::search_request::{SearchRequest, SimilarRequest, SuggestRequest};
pub use types::search_response::{Facet, FacetTerm, SearchHit, SearchResponse, Suggestion};
