//! Catalog file loading.

use std::path::Path;

use tracing::info;

use crate::errors::IngestError;
use doofinder_shared::CatalogRecord;

/// Parse a catalog export: a JSON array of product objects.
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogRecord>, IngestError> {
    serde_json::from_str(json).map_err(|e| IngestError::catalog(format!("Invalid catalog JSON: {e}")))
}

/// Read and parse a catalog export from `path`. The whole file is loaded
/// into memory.
pub async fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<CatalogRecord>, IngestError> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| IngestError::catalog(format!("Failed to read {}: {e}", path.display())))?;

    let records = parse_catalog(&contents)?;
    info!(path = %path.display(), record_count = records.len(), "Loaded catalog");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_catalog() {
        let records =
            parse_catalog(r#"[{"title": "A", "platform_id": 1}, {"title": "B"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].platform_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_parse_catalog_rejects_non_array() {
        assert!(matches!(
            parse_catalog(r#"{"title": "A"}"#),
            Err(IngestError::CatalogError(_))
        ));
    }

    #[tokio::test]
    async fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"title": "Lamp", "price": 12.5}}]"#).unwrap();

        let records = load_catalog(file.path()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, Some(12.5));
    }

    #[tokio::test]
    async fn test_load_catalog_missing_file() {
        let result = load_catalog("/nonexistent/catalog.json").await;
        assert!(matches!(result, Err(IngestError::CatalogError(_))));
    }
}
