//! Start/ok/nok notification protocol
//!
//! Every asynchronous remote operation emits a uniform three-event shape so
//! consumers can render in-flight / succeeded / failed state without
//! operation-specific branching: a `start` is emitted synchronously before
//! the call begins, followed by exactly one terminal `ok` or `nok`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::time_entry::ports::TransportError;

/// The four remote time-entry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    Publish,
    Update,
    Delete,
    GetAll,
}

/// One event of the notification protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Notification {
    /// Operation is in flight.
    Start { kind: OperationKind },
    /// Operation resolved; `payload` is the operation's result data.
    Ok { kind: OperationKind, payload: Value },
    /// Operation rejected; carries the normalized failure.
    Nok { kind: OperationKind, error: GatewayError },
}

impl Notification {
    /// Envelope emitted before the underlying call begins.
    pub fn start(kind: OperationKind) -> Self {
        Self::Start { kind }
    }

    /// Terminal success envelope.
    pub fn ok(kind: OperationKind, payload: Value) -> Self {
        Self::Ok { kind, payload }
    }

    /// Terminal failure envelope.
    pub fn nok(kind: OperationKind, error: impl Into<GatewayError>) -> Self {
        Self::Nok { kind, error: error.into() }
    }

    /// Operation tag of this envelope.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Start { kind } | Self::Ok { kind, .. } | Self::Nok { kind, .. } => *kind,
        }
    }

    /// Whether this envelope ends an invocation.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Start { .. })
    }
}

/// The single error kind that crosses the gateway boundary.
///
/// Every transport failure collapses into this shape; no distinction beyond
/// the embedded status code survives. `status` is `0` when the transport did
/// not supply one (e.g. connection refused before any response).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Error {status} ({message})")]
pub struct GatewayError {
    pub status: u16,
    pub message: String,
}

impl From<TransportError> for GatewayError {
    fn from(err: TransportError) -> Self {
        Self { status: err.status.unwrap_or(0), message: err.message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_error_message_format() {
        let err = GatewayError { status: 500, message: "Whoops".to_string() };
        assert_eq!(err.to_string(), "Error 500 (Whoops)");
    }

    #[test]
    fn missing_status_defaults_to_zero() {
        let err: GatewayError = TransportError::network("connection refused").into();
        assert_eq!(err.status, 0);
        assert_eq!(err.to_string(), "Error 0 (connection refused)");
    }

    #[test]
    fn transport_status_is_preserved() {
        let err: GatewayError = TransportError::status(404, "Not found").into();
        assert_eq!(err, GatewayError { status: 404, message: "Not found".to_string() });
    }

    #[test]
    fn start_is_not_terminal() {
        let start = Notification::start(OperationKind::Update);
        assert!(!start.is_terminal());
        assert_eq!(start.kind(), OperationKind::Update);
    }

    #[test]
    fn ok_and_nok_are_terminal() {
        let ok = Notification::ok(OperationKind::GetAll, Value::Null);
        let nok = Notification::nok(OperationKind::Delete, TransportError::status(500, "boom"));
        assert!(ok.is_terminal());
        assert!(nok.is_terminal());
        assert_eq!(ok.kind(), OperationKind::GetAll);
        assert_eq!(nok.kind(), OperationKind::Delete);
    }
}
