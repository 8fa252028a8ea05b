//! Time entry gateway - the only component that talks to the remote
//! time-entry endpoints
//!
//! Owns domain-to-wire translation in both directions and wraps every call
//! in the start/ok/nok notification protocol. Transport failures never
//! escape this boundary: operations return `()` and report outcomes solely
//! through the dispatch seam.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tally_domain::constants::WIRE_DATE_FORMAT;
use tally_domain::{NamedRef, TimeEntry, TimeEntryPatch};
use tracing::{debug, warn};

use super::ports::{Transport, TransportError};
use crate::dispatch::{Dispatch, Event};
use crate::notifications::{Notification, OperationKind};

/// Explicit per-call context.
///
/// Replaces ambient state: the acting user is always the session's
/// authenticated user supplied here, never a value embedded in a draft
/// entry, and results flow through the supplied dispatch.
pub struct GatewayContext {
    pub current_user: NamedRef,
    pub dispatch: Arc<dyn Dispatch>,
}

impl GatewayContext {
    pub fn new(current_user: NamedRef, dispatch: Arc<dyn Dispatch>) -> Self {
        Self { current_user, dispatch }
    }

    fn emit(&self, notification: Notification) {
        self.dispatch.dispatch(Event::Notification(notification));
    }
}

/// Query parameters for listing time entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub issue_id: i64,
    pub project_id: i64,
    pub offset: u32,
    pub limit: u32,
}

impl ListQuery {
    fn to_params(self) -> Vec<(String, String)> {
        vec![
            ("offset".to_string(), self.offset.to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("project_id".to_string(), self.project_id.to_string()),
            ("issue_id".to_string(), self.issue_id.to_string()),
        ]
    }
}

/// Synthesized confirmation for a successful delete.
///
/// The server body is not assumed to carry anything useful, so the receipt
/// is built from the call's inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteReceipt {
    pub time_entry_id: i64,
    pub issue_id: i64,
}

/// Wire body for create/update calls, nested under `time_entry`.
#[derive(Debug, Serialize)]
struct TimeEntryBody {
    time_entry: TimeEntryFields,
}

/// Snake-case wire fields; absent fields are omitted so an update carries
/// only what actually changed. Nested references are flattened to bare ids.
#[derive(Debug, Default, Serialize)]
struct TimeEntryFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    issue_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spent_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    activity_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
}

/// Gateway over the transport port for the four time-entry operations.
pub struct TimeEntryGateway {
    transport: Arc<dyn Transport>,
}

impl TimeEntryGateway {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a new time entry on the server.
    ///
    /// `user_id` comes from `ctx.current_user`, not from `entry.user`. On
    /// success the `ok` payload is the server's raw response, including the
    /// server-assigned id.
    pub async fn publish(&self, ctx: &GatewayContext, entry: &TimeEntry) {
        ctx.emit(Notification::start(OperationKind::Publish));

        let body = wire_body(TimeEntryFields {
            issue_id: Some(entry.issue.id),
            spent_on: Some(entry.spent_on.format(WIRE_DATE_FORMAT).to_string()),
            hours: Some(entry.hours),
            activity_id: Some(entry.activity.id),
            comments: Some(entry.comments.clone()),
            user_id: Some(ctx.current_user.id),
        });

        debug!(issue_id = entry.issue.id, "publishing time entry");
        match self.transport.post("/time_entries.json", &body).await {
            Ok(payload) => ctx.emit(Notification::ok(OperationKind::Publish, payload)),
            Err(err) => {
                warn!(error = %err, "time entry publish failed");
                ctx.emit(Notification::nok(OperationKind::Publish, err));
            }
        }
    }

    /// Update an existing entry with a partial patch.
    ///
    /// Only fields present in `patch` are sent. On success the `ok` payload
    /// is `original` merged with `patch` client-side; the server echo is not
    /// consulted. If the server silently alters a field (e.g. validation
    /// clamping hours), local state diverges undetected.
    pub async fn update(&self, ctx: &GatewayContext, original: &TimeEntry, patch: &TimeEntryPatch) {
        ctx.emit(Notification::start(OperationKind::Update));

        let Some(id) = original.id else {
            warn!("attempted to update a time entry without a server id");
            ctx.emit(Notification::nok(
                OperationKind::Update,
                TransportError::network("time entry has no server id"),
            ));
            return;
        };

        let body = wire_body(TimeEntryFields {
            comments: patch.comments.clone(),
            hours: patch.hours,
            activity_id: patch.activity.as_ref().map(|a| a.id),
            spent_on: patch.spent_on.map(|d| d.format(WIRE_DATE_FORMAT).to_string()),
            ..Default::default()
        });

        debug!(time_entry_id = id, "updating time entry");
        match self.transport.put(&format!("/time_entries/{id}.json"), &body).await {
            Ok(_) => {
                let merged = original.merged(patch);
                let payload = serde_json::to_value(merged).unwrap_or(Value::Null);
                ctx.emit(Notification::ok(OperationKind::Update, payload));
            }
            Err(err) => {
                warn!(time_entry_id = id, error = %err, "time entry update failed");
                ctx.emit(Notification::nok(OperationKind::Update, err));
            }
        }
    }

    /// Delete a time entry. On success the `ok` payload is a
    /// [`DeleteReceipt`] synthesized from the inputs.
    pub async fn remove(&self, ctx: &GatewayContext, time_entry_id: i64, issue_id: i64) {
        ctx.emit(Notification::start(OperationKind::Delete));

        debug!(time_entry_id, issue_id, "deleting time entry");
        match self.transport.delete(&format!("/time_entries/{time_entry_id}.json")).await {
            Ok(_) => {
                let receipt = DeleteReceipt { time_entry_id, issue_id };
                let payload = serde_json::to_value(receipt).unwrap_or(Value::Null);
                ctx.emit(Notification::ok(OperationKind::Delete, payload));
            }
            Err(err) => {
                warn!(time_entry_id, error = %err, "time entry delete failed");
                ctx.emit(Notification::nok(OperationKind::Delete, err));
            }
        }
    }

    /// List time entries for an issue. On success the `ok` payload is the
    /// raw paged response.
    pub async fn list(&self, ctx: &GatewayContext, query: ListQuery) {
        ctx.emit(Notification::start(OperationKind::GetAll));

        debug!(issue_id = query.issue_id, offset = query.offset, "listing time entries");
        match self.transport.get("/time_entries.json", &query.to_params()).await {
            Ok(payload) => ctx.emit(Notification::ok(OperationKind::GetAll, payload)),
            Err(err) => {
                warn!(issue_id = query.issue_id, error = %err, "time entry list failed");
                ctx.emit(Notification::nok(OperationKind::GetAll, err));
            }
        }
    }
}

fn wire_body(fields: TimeEntryFields) -> Value {
    serde_json::to_value(TimeEntryBody { time_entry: fields }).unwrap_or(Value::Null)
}
