//! Tracker REST API adapters

pub mod transport;

pub use transport::{RestTransport, RestTransportConfig};
