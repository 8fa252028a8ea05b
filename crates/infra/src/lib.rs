//! # Tally Infra
//!
//! Infrastructure adapters for the Tally core:
//! - reqwest-backed HTTP client with timeout and bounded retry
//! - REST transport implementing the core transport port
//! - configuration loading (environment first, file fallback)
//!
//! ## Architecture
//! - Implements ports defined in `tally-core`
//! - The only crate that talks to the network

pub mod api;
pub mod config;
pub mod http;

pub use api::{RestTransport, RestTransportConfig};
pub use config::{ApiConfig, Config, TrackingConfig};
pub use http::HttpClient;
