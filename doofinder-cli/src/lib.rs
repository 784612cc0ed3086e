//! Shared pieces of the `df-ingest`, `df-search` and `df-bench` tools.

pub mod args;
pub mod bench;
pub mod render;
pub mod telemetry;
