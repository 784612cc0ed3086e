//! Catalog record type.
//!
//! A catalog record is one product entry from the input JSON file. Every
//! field is optional at parse time; the transform stage decides which fields
//! are required and which fall back to defaults.

use serde::Deserialize;

use super::de;

/// One product entry from a catalog export.
///
/// Unknown keys in the source object are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogRecord {
    /// Identifier from the source platform. Accepts strings or integers.
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub platform_id: Option<String>,
    /// Product title. Required by the transform stage.
    #[serde(default)]
    pub title: Option<String>,
    /// Long description text.
    #[serde(default)]
    pub description: Option<String>,
    /// Product image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Product page URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Price. Accepts numbers or numeric strings.
    #[serde(default, deserialize_with = "de::opt_price")]
    pub price: Option<f64>,
    /// Category path or list of categories.
    #[serde(default, deserialize_with = "de::opt_one_or_many")]
    pub category: Option<Vec<String>>,
}

impl CatalogRecord {
    /// Create a record with only a title set.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_platform_id(mut self, platform_id: impl Into<String>) -> Self {
        self.platform_id = Some(platform_id.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.category = Some(categories);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_record() {
        let json = r#"{
            "platform_id": "sku-1",
            "title": "Running shoe",
            "description": "Light and fast",
            "image_url": "https://cdn.example.com/1.jpg",
            "url": "https://shop.example.com/p/1",
            "price": 89.9,
            "category": ["Shoes", "Running"]
        }"#;

        let record: CatalogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.platform_id.as_deref(), Some("sku-1"));
        assert_eq!(record.title.as_deref(), Some("Running shoe"));
        assert_eq!(record.price, Some(89.9));
        assert_eq!(
            record.category,
            Some(vec!["Shoes".to_string(), "Running".to_string()])
        );
    }

    #[test]
    fn test_missing_fields_are_none() {
        let record: CatalogRecord = serde_json::from_str(r#"{"title": "Mug"}"#).unwrap();
        assert_eq!(record, CatalogRecord::titled("Mug"));
    }

    #[test]
    fn test_lenient_scalars() {
        let json = r#"{"platform_id": 42, "title": "Lamp", "price": "19.50", "category": "Home"}"#;
        let record: CatalogRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.platform_id.as_deref(), Some("42"));
        assert_eq!(record.price, Some(19.5));
        assert_eq!(record.category, Some(vec!["Home".to_string()]));
    }

    #[test]
    fn test_nulls_and_unknown_keys() {
        let json = r#"{"title": "Desk", "price": null, "platform_id": null, "brand": "Acme"}"#;
        let record: CatalogRecord = serde_json::from_str(json).unwrap();

        assert!(record.price.is_none());
        assert!(record.platform_id.is_none());
    }

    #[test]
    fn test_invalid_price_string_is_rejected() {
        let result = serde_json::from_str::<CatalogRecord>(r#"{"title": "Desk", "price": "cheap"}"#);
        assert!(result.is_err());
    }
}
