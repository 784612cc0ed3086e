//! Error types for the Doofinder repository.

mod search_service_error;

pub use search_service_error::SearchServiceError;
