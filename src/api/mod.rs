//! Remote API surface: typed entity models and the reqwest-backed client.

pub mod client;
pub mod models;

pub use client::ApiClient;
