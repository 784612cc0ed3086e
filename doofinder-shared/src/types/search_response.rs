//! Response types returned by the search service.

use serde::de::Deserializer;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::de;

/// Result page from `/_search` or `/_visually_similar`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResponse {
    /// Total number of matches across all pages.
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub results: Vec<SearchHit>,
    #[serde(default, deserialize_with = "facets_list_or_map")]
    pub facets: Vec<Facet>,
}

impl SearchResponse {
    /// Ids of the hits on this page, in rank order.
    pub fn ids(&self) -> Vec<String> {
        self.results.iter().map(|hit| hit.id.clone()).collect()
    }
}

/// One matched item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::opt_price")]
    pub price: Option<f64>,
    /// Remaining fields returned by the service.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Aggregation over one field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Facet {
    pub key: String,
    #[serde(default)]
    pub terms: Option<TermsFacet>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TermsFacet {
    #[serde(default)]
    pub items: Vec<FacetTerm>,
}

/// One facet bucket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FacetTerm {
    pub name: String,
    pub count: u64,
}

#[derive(Deserialize)]
struct KeylessFacet {
    #[serde(default)]
    terms: Option<TermsFacet>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FacetsPayload {
    List(Vec<Facet>),
    Keyed(Map<String, Value>),
}

/// Facets arrive either as a list of `{key, terms}` objects or as an object
/// keyed by facet name. Both are normalized to the list form.
fn facets_list_or_map<'de, D>(deserializer: D) -> Result<Vec<Facet>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<FacetsPayload>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(FacetsPayload::List(list)) => Ok(list),
        Some(FacetsPayload::Keyed(map)) => map
            .into_iter()
            .map(|(key, value)| {
                let facet: KeylessFacet =
                    serde_json::from_value(value).map_err(serde::de::Error::custom)?;
                Ok(Facet {
                    key,
                    terms: facet.terms,
                })
            })
            .collect(),
    }
}

/// One entry from `/_suggest`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Suggestion {
    Term(String),
    Object { term: String },
}

impl Suggestion {
    pub fn term(&self) -> &str {
        match self {
            Self::Term(term) | Self::Object { term } => term,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_parse() {
        let json = r#"{
            "total": 2,
            "results": [
                {"id": "a1", "title": "Shoe", "description": "Fast", "price": 10.5, "brand": "Acme"},
                {"id": 7, "title": "Sock"}
            ],
            "facets": [
                {"key": "brand", "terms": {"items": [{"name": "Acme", "count": 2}]}}
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total, 2);
        assert_eq!(response.ids(), vec!["a1".to_string(), "7".to_string()]);
        assert_eq!(response.results[0].extra["brand"], "Acme");
        assert!(response.results[1].description.is_none());
        assert_eq!(response.facets[0].key, "brand");
        assert_eq!(response.facets[0].terms.as_ref().unwrap().items[0].count, 2);
    }

    #[test]
    fn test_keyed_facets_are_normalized() {
        let json = r#"{
            "total": 0,
            "results": [],
            "facets": {"brand": {"terms": {"items": [{"name": "Acme", "count": 3}]}}, "price": {}}
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.facets.len(), 2);
        assert_eq!(response.facets[0].key, "brand");
        assert!(response.facets[1].terms.is_none());
    }

    #[test]
    fn test_missing_facets() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"total": 0, "results": [], "facets": null}"#).unwrap();
        assert!(response.facets.is_empty());
    }

    #[test]
    fn test_suggestion_shapes() {
        let suggestions: Vec<Suggestion> =
            serde_json::from_str(r#"["shoe", {"term": "shoes"}]"#).unwrap();
        let terms: Vec<&str> = suggestions.iter().map(Suggestion::term).collect();
        assert_eq!(terms, vec!["shoe", "shoes"]);
    }
}
