//! Interface definitions for the search service client.
//!
//! The traits here allow dependency injection of the HTTP client, so the
//! ingest pipeline and the command-line tools can be tested against mocks.

mod index_client;
mod query_client;

pub use index_client::{temporary_index_name, IndexClient, TEMP_INDEX_SUFFIX};
pub use query_client::QueryClient;
