//! # Doofinder Repository
//!
//! Interfaces and the HTTP implementation for talking to the Doofinder
//! search service. Index management (temporary index creation, bulk item
//! upload, index replacement) and querying (search, suggest, visual
//! similarity) are split into two traits so callers can depend on only the
//! half they use, and tests can substitute mocks.

pub mod config;
pub mod doofinder;
pub mod errors;
pub mod interfaces;
pub mod types;

pub use config::ServiceConfig;
pub use doofinder::DoofinderClient;
pub use errors::SearchServiceError;
pub use interfaces::{IndexClient, QueryClient};
pub use types::BatchResult;
