//! Lenient deserializers for catalog exports.
//!
//! Product exports disagree on scalar types: ids arrive as strings or
//! integers, prices as numbers or numeric strings, categories as a list or a
//! single string. These helpers normalize them at the boundary.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Integer(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
        }
    }
}

pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<StringOrNumber> = Option::deserialize(deserializer)?;
    Ok(value.map(StringOrNumber::into_string))
}

pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

pub(crate) fn opt_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOrNumber::Integer(i)) => Ok(Some(i as f64)),
        Some(StringOrNumber::Float(f)) => Ok(Some(f)),
        Some(StringOrNumber::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid price: {s:?}"))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

pub(crate) fn opt_one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<OneOrMany> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(list) => list,
    }))
}
