//! Doofinder implementation of the client interfaces.

mod client;
pub mod params;

pub use client::DoofinderClient;
