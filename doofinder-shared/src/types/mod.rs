//! Core data structures for catalog ingestion and search.

pub mod catalog_record;
mod de;
pub mod item;
pub mod search_params;
pub mod search_request;
pub mod search_response;
