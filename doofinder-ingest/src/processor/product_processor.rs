//! Product processor.
//!
//! Maps catalog records to the fixed item shape accepted by the items
//! endpoint.

use chrono::Utc;
use tracing::{debug, instrument};

use crate::errors::{IngestError, TransformError};
use doofinder_shared::{CatalogRecord, Item, AVAILABILITY_IN_STOCK};

/// Timestamp id for records without `platform_id`: seconds since the epoch
/// with a microsecond fraction.
///
/// Two records transformed within the same microsecond get the same id.
pub fn fallback_id() -> String {
    let now = Utc::now();
    format!("{}.{:06}", now.timestamp(), now.timestamp_subsec_micros())
}

/// Transform one catalog record.
///
/// Fails only when `title` is absent. Every other field falls back to a
/// default: empty strings for text, `0.0` for price, no categories, and a
/// timestamp id.
pub fn transform_product(record: CatalogRecord) -> Result<Item, TransformError> {
    let title = record.title.ok_or(TransformError::MissingField("title"))?;

    Ok(Item {
        id: record.platform_id.unwrap_or_else(fallback_id),
        title,
        description: record.description.unwrap_or_default(),
        image_url: record.image_url.unwrap_or_default(),
        link: record.url.unwrap_or_default(),
        price: record.price.unwrap_or(0.0),
        categories: record.category.unwrap_or_default(),
        availability: AVAILABILITY_IN_STOCK.to_string(),
    })
}

/// Transform every record in order, stopping at the first failure.
#[instrument(skip(records), fields(record_count = records.len()))]
pub fn transform_all(records: Vec<CatalogRecord>) -> Result<Vec<Item>, IngestError> {
    let items = records
        .into_iter()
        .enumerate()
        .map(|(position, record)| {
            transform_product(record)
                .map_err(|source| IngestError::TransformError { position, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(item_count = items.len(), "Transformed catalog records");
    Ok(items)
}
