//! Port interfaces for time entry synchronization
//!
//! These traits define the boundary between the gateway and the HTTP
//! transport implementation in the infra layer.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure reported by the transport collaborator.
///
/// `status` carries the HTTP status when a response was received; it is
/// `None` for failures below the protocol level (DNS, refused connection,
/// timeout). Normalization into the single gateway-facing error shape
/// happens in [`crate::notifications::GatewayError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    /// Failure with an HTTP status code.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self { status: Some(status), message: message.into() }
    }

    /// Failure without a status code (network-level).
    pub fn network(message: impl Into<String>) -> Self {
        Self { status: None, message: message.into() }
    }
}

/// Result of a single transport call.
pub type TransportResult = Result<Value, TransportError>;

/// The remote-call surface the gateway depends on.
///
/// Implementations own base-URL joining, authentication headers, timeouts
/// and any retry policy; the gateway issues exactly one logical call per
/// operation and never retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Create a resource; resolves with the response body as JSON.
    async fn post(&self, path: &str, body: &Value) -> TransportResult;

    /// Update a resource.
    async fn put(&self, path: &str, body: &Value) -> TransportResult;

    /// Delete a resource.
    async fn delete(&self, path: &str) -> TransportResult;

    /// Fetch a resource; `query` is appended as URL query parameters.
    async fn get(&self, path: &str, query: &[(String, String)]) -> TransportResult;
}
