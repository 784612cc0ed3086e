//! Typed search parameters.
//!
//! Filters, sort entries and facet requests arrive from the command line as
//! JSON. They are parsed into tagged structures here so the wire encoder in
//! the repository crate never has to guess at shapes.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

/// Errors raised while parsing search parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// The input was not valid JSON.
    #[error("Invalid JSON for {param}: {reason}")]
    InvalidJson { param: &'static str, reason: String },

    /// The JSON was valid but did not have the expected shape.
    #[error("Invalid {param}: {reason}")]
    InvalidShape { param: &'static str, reason: String },

    /// An enumerated value was not recognized.
    #[error("Unknown {param} value: {value}")]
    UnknownValue { param: &'static str, value: String },
}

impl ParamError {
    fn shape(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            param,
            reason: reason.into(),
        }
    }
}

fn parse_json(param: &'static str, input: &str) -> Result<Value, ParamError> {
    serde_json::from_str(input).map_err(|e| ParamError::InvalidJson {
        param,
        reason: e.to_string(),
    })
}

/// Render a JSON scalar the way it appears in a query string.
fn scalar_to_param(param: &'static str, value: &Value) -> Result<String, ParamError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(ParamError::shape(param, "null is not a valid value")),
        Value::Array(_) | Value::Object(_) => {
            Err(ParamError::shape(param, format!("expected a scalar, got {value}")))
        }
    }
}

/// A condition on one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    /// Match any of the listed values. Encoded as `filter[field][]=value`.
    Terms(Vec<String>),
    /// Operator to value pairs, e.g. `gte`/`lt`. Encoded as
    /// `filter[field][op]=value`.
    Range(Vec<(String, String)>),
}

/// Ordered set of field filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters(Vec<(String, FilterSpec)>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single-value terms filter.
    pub fn with_term(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(field, FilterSpec::Terms(vec![value.into()]))
    }

    /// Add an operator filter.
    pub fn with_range<F, O, V>(self, field: F, conditions: impl IntoIterator<Item = (O, V)>) -> Self
    where
        F: Into<String>,
        O: Into<String>,
        V: Into<String>,
    {
        let conditions = conditions
            .into_iter()
            .map(|(op, value)| (op.into(), value.into()))
            .collect();
        self.with(field, FilterSpec::Range(conditions))
    }

    pub fn with(mut self, field: impl Into<String>, spec: FilterSpec) -> Self {
        self.0.push((field.into(), spec));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterSpec)> {
        self.0.iter().map(|(field, spec)| (field.as_str(), spec))
    }

    /// Parse a filter object such as `{"price": {"gte": 100}, "brand": "nike"}`.
    ///
    /// Object values become range filters, arrays and scalars become terms
    /// filters.
    pub fn from_json(value: &Value) -> Result<Self, ParamError> {
        const PARAM: &str = "filter";

        let object = value
            .as_object()
            .ok_or_else(|| ParamError::shape(PARAM, "expected a JSON object"))?;

        let mut filters = Self::new();
        for (field, conditions) in object {
            let spec = match conditions {
                Value::Object(ops) => {
                    if ops.is_empty() {
                        return Err(ParamError::shape(
                            PARAM,
                            format!("field {field} has no operators"),
                        ));
                    }
                    let ranges = ops
                        .iter()
                        .map(|(op, v)| -> Result<(String, String), ParamError> {
                            Ok((op.clone(), scalar_to_param(PARAM, v)?))
                        })
                        .collect::<Result<Vec<_>, ParamError>>()?;
                    FilterSpec::Range(ranges)
                }
                Value::Array(values) => FilterSpec::Terms(
                    values
                        .iter()
                        .map(|v| scalar_to_param(PARAM, v))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                scalar => FilterSpec::Terms(vec![scalar_to_param(PARAM, scalar)?]),
            };
            filters = filters.with(field.clone(), spec);
        }

        Ok(filters)
    }
}

impl FromStr for Filters {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(&parse_json("filter", s)?)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParamError::UnknownValue {
                param: "sort order",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sort key. Position in the sort list sets priority.
#[derive(Debug, Clone, PartialEq)]
pub struct SortEntry {
    pub field: String,
    pub order: SortOrder,
}

impl SortEntry {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }

    /// Parse a sort list such as `[{"price": "asc"}, {"title": "desc"}]`.
    pub fn parse_list(input: &str) -> Result<Vec<Self>, ParamError> {
        const PARAM: &str = "sort";

        let value = parse_json(PARAM, input)?;
        let entries = value
            .as_array()
            .ok_or_else(|| ParamError::shape(PARAM, "expected a JSON array"))?;

        entries
            .iter()
            .map(|entry| {
                let object = entry
                    .as_object()
                    .ok_or_else(|| ParamError::shape(PARAM, "each entry must be an object"))?;
                if object.len() != 1 {
                    return Err(ParamError::shape(
                        PARAM,
                        format!("each entry must name exactly one field, got {entry}"),
                    ));
                }
                let (field, direction) = object
                    .iter()
                    .next()
                    .ok_or_else(|| ParamError::shape(PARAM, "empty entry"))?;
                let direction = direction
                    .as_str()
                    .ok_or_else(|| ParamError::shape(PARAM, "direction must be a string"))?;
                Ok(Self {
                    field: field.clone(),
                    order: direction.parse()?,
                })
            })
            .collect()
    }
}

/// One facet request: ordered key to value settings such as
/// `{"field": "brand", "size": 10}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetSpec(Vec<(String, String)>);

impl FacetSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a facet list such as `[{"field": "brand", "size": 10}]`.
    pub fn parse_list(input: &str) -> Result<Vec<Self>, ParamError> {
        const PARAM: &str = "facets";

        let value = parse_json(PARAM, input)?;
        let entries = value
            .as_array()
            .ok_or_else(|| ParamError::shape(PARAM, "expected a JSON array"))?;

        entries
            .iter()
            .map(|entry| {
                let object = entry
                    .as_object()
                    .ok_or_else(|| ParamError::shape(PARAM, "each entry must be an object"))?;
                object
                    .iter()
                    .try_fold(Self::new(), |facet, (key, v)| -> Result<Self, ParamError> {
                        Ok(facet.with(key.clone(), scalar_to_param(PARAM, v)?))
                    })
            })
            .collect()
    }
}

/// Matching strategy requested from the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryName {
    MatchAnd,
    MatchOr,
    Fuzzy,
}

impl QueryName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MatchAnd => "match_and",
            Self::MatchOr => "match_or",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl FromStr for QueryName {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "match_and" => Ok(Self::MatchAnd),
            "match_or" => Ok(Self::MatchOr),
            "fuzzy" => Ok(Self::Fuzzy),
            _ => Err(ParamError::UnknownValue {
                param: "query name",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for QueryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_from_json() {
        let filters: Filters = r#"{"price": {"gte": 100, "lt": 200}, "brand": "nike"}"#
            .parse()
            .unwrap();
        let parsed: Vec<_> = filters.iter().collect();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].0, "price");
        assert_eq!(
            parsed[0].1,
            &FilterSpec::Range(vec![
                ("gte".to_string(), "100".to_string()),
                ("lt".to_string(), "200".to_string()),
            ])
        );
        assert_eq!(parsed[1].0, "brand");
        assert_eq!(parsed[1].1, &FilterSpec::Terms(vec!["nike".to_string()]));
    }

    #[test]
    fn test_filters_array_and_bool_values() {
        let filters: Filters = r#"{"color": ["red", "blue"], "in_stock": true}"#.parse().unwrap();
        let parsed: Vec<_> = filters.iter().collect();

        assert_eq!(
            parsed[0].1,
            &FilterSpec::Terms(vec!["red".to_string(), "blue".to_string()])
        );
        assert_eq!(parsed[1].1, &FilterSpec::Terms(vec!["true".to_string()]));
    }

    #[test]
    fn test_filters_rejects_bad_input() {
        assert!(matches!(
            "{not json".parse::<Filters>(),
            Err(ParamError::InvalidJson { .. })
        ));
        assert!(matches!(
            "[1, 2]".parse::<Filters>(),
            Err(ParamError::InvalidShape { .. })
        ));
        assert!(matches!(
            r#"{"price": {}}"#.parse::<Filters>(),
            Err(ParamError::InvalidShape { .. })
        ));
        assert!(matches!(
            r#"{"brand": null}"#.parse::<Filters>(),
            Err(ParamError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_sort_parse_list() {
        let sort = SortEntry::parse_list(r#"[{"price": "asc"}, {"title": "DESC"}]"#).unwrap();
        assert_eq!(sort, vec![SortEntry::asc("price"), SortEntry::desc("title")]);
    }

    #[test]
    fn test_sort_rejects_multi_field_entry() {
        let result = SortEntry::parse_list(r#"[{"price": "asc", "title": "desc"}]"#);
        assert!(matches!(result, Err(ParamError::InvalidShape { .. })));
    }

    #[test]
    fn test_sort_rejects_unknown_direction() {
        let result = SortEntry::parse_list(r#"[{"price": "up"}]"#);
        assert!(matches!(result, Err(ParamError::UnknownValue { .. })));
    }

    #[test]
    fn test_facet_parse_list() {
        let facets = FacetSpec::parse_list(r#"[{"field": "brand", "size": 10}]"#).unwrap();
        assert_eq!(facets.len(), 1);
        let pairs: Vec<_> = facets[0].iter().collect();
        assert_eq!(pairs, vec![("field", "brand"), ("size", "10")]);
    }

    #[test]
    fn test_query_name_round_trip() {
        for name in ["match_and", "match_or", "fuzzy"] {
            let parsed: QueryName = name.parse().unwrap();
            assert_eq!(parsed.as_str(), name);
        }
        assert!("exact".parse::<QueryName>().is_err());
    }
}
