//! Query-string encoders.
//!
//! The search API takes structured parameters flattened into bracketed keys:
//! `filter[field][op]`, `sort[i][field]`, `facets[i][key]` and `indices[]`.
//! Each encoder appends to an ordered parameter list so repeated keys are
//! preserved.

use uuid::Uuid;

use doofinder_shared::{FacetSpec, FilterSpec, Filters, SearchRequest, SimilarRequest, SortEntry, SuggestRequest};

/// Ordered list of query-string pairs.
pub type QueryParams = Vec<(String, String)>;

pub const SESSION_ID_PARAM: &str = "session_id";

/// Fresh random session identifier. Never reused across calls.
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn encode_filters(filters: &Filters, params: &mut QueryParams) {
    for (field, spec) in filters.iter() {
        match spec {
            FilterSpec::Terms(values) => {
                for value in values {
                    params.push((format!("filter[{field}][]"), value.clone()));
                }
            }
            FilterSpec::Range(conditions) => {
                for (op, value) in conditions {
                    params.push((format!("filter[{field}][{op}]"), value.clone()));
                }
            }
        }
    }
}

pub fn encode_sort(sort: &[SortEntry], params: &mut QueryParams) {
    for (idx, entry) in sort.iter().enumerate() {
        params.push((
            format!("sort[{idx}][{}]", entry.field),
            entry.order.as_str().to_string(),
        ));
    }
}

pub fn encode_facets(facets: &[FacetSpec], params: &mut QueryParams) {
    for (idx, facet) in facets.iter().enumerate() {
        for (key, value) in facet.iter() {
            params.push((format!("facets[{idx}][{key}]"), value.to_string()));
        }
    }
}

pub fn encode_indices(indices: &[String], params: &mut QueryParams) {
    for index in indices {
        params.push(("indices[]".to_string(), index.clone()));
    }
}

/// Parameters for `GET /_search`.
pub fn search_params(request: &SearchRequest, session_id: &str) -> QueryParams {
    let mut params = vec![
        ("query".to_string(), request.query.clone()),
        ("page".to_string(), request.page.to_string()),
        ("rpp".to_string(), request.rpp.to_string()),
        (SESSION_ID_PARAM.to_string(), session_id.to_string()),
    ];

    encode_indices(&request.indices, &mut params);
    encode_filters(&request.filters, &mut params);
    encode_sort(&request.sort, &mut params);
    encode_facets(&request.facets, &mut params);

    if let Some(query_name) = request.query_name {
        params.push(("query_name".to_string(), query_name.as_str().to_string()));
    }

    params
}

/// Parameters for `GET /_suggest`.
pub fn suggest_params(request: &SuggestRequest, session_id: &str) -> QueryParams {
    let mut params = vec![
        ("query".to_string(), request.query.clone()),
        (SESSION_ID_PARAM.to_string(), session_id.to_string()),
    ];
    encode_indices(&request.indices, &mut params);
    params
}

/// Parameters for `GET /_visually_similar`.
pub fn similar_params(request: &SimilarRequest, session_id: &str) -> QueryParams {
    let mut params = vec![
        ("dfid".to_string(), request.product_id.clone()),
        ("rpp".to_string(), request.rpp.to_string()),
        ("exclude_self".to_string(), request.exclude_self.to_string()),
        (SESSION_ID_PARAM.to_string(), session_id.to_string()),
    ];
    encode_filters(&request.filters, &mut params);
    params
}
