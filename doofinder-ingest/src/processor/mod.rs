//! Processor module for catalog ingestion.
//!
//! Transforms catalog records into index items.

mod product_processor;

pub use product_processor::{fallback_id, transform_all, transform_product};
