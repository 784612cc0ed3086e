//! Item type.
//!
//! The fixed-shape record accepted by the remote items endpoint.

use serde::{Deserialize, Serialize};

/// Availability value sent for every uploaded item.
pub const AVAILABILITY_IN_STOCK: &str = "in stock";

/// A product in the remote index schema.
///
/// All fields are always present on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link: String,
    pub price: f64,
    pub categories: Vec<String>,
    pub availability: String,
}
