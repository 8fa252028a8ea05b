//! End-to-end tests: gateway through the REST transport against a mock
//! tracker server.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tally_core::testing::RecordingDispatch;
use tally_core::{
    GatewayContext, ListQuery, Notification, OperationKind, TimeEntryGateway, TimeTracker,
};
use tally_domain::{NamedRef, TimeEntry, TimeEntryPatch};
use tally_infra::{RestTransport, RestTransportConfig};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> TimeEntryGateway {
    let transport = RestTransport::new(&RestTransportConfig::new(server.uri(), "multipass"))
        .expect("transport");
    TimeEntryGateway::new(Arc::new(transport))
}

fn context(dispatch: Arc<RecordingDispatch>) -> GatewayContext {
    GatewayContext::new(NamedRef::named(1, "John Wayne"), dispatch)
}

fn draft_entry() -> TimeEntry {
    TimeEntry {
        id: None,
        issue: NamedRef::new(1),
        user: NamedRef::new(1),
        activity: NamedRef::new(1),
        spent_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        hours: 1.5,
        comments: "Hello".to_string(),
    }
}

#[tokio::test]
async fn publish_posts_wire_payload_and_reports_ok() {
    let server = MockServer::start().await;
    let created = json!({ "time_entry": { "id": 42 } });
    Mock::given(method("POST"))
        .and(path("/time_entries.json"))
        .and(header("X-Api-Key", "multipass"))
        .and(body_json(json!({
            "time_entry": {
                "issue_id": 1,
                "spent_on": "2024-01-01",
                "hours": 1.5,
                "activity_id": 1,
                "comments": "Hello",
                "user_id": 1
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(created.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let dispatch = RecordingDispatch::new();
    gateway(&server).publish(&context(dispatch.clone()), &draft_entry()).await;

    assert_eq!(
        dispatch.notifications(),
        vec![
            Notification::start(OperationKind::Publish),
            Notification::ok(OperationKind::Publish, created),
        ]
    );
}

#[tokio::test]
async fn publish_failure_reports_normalized_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/time_entries.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Whoops"))
        .expect(1)
        .mount(&server)
        .await;

    let dispatch = RecordingDispatch::new();
    gateway(&server).publish(&context(dispatch.clone()), &draft_entry()).await;

    let events = dispatch.notifications();
    assert_eq!(events.len(), 2);
    let Notification::Nok { kind, error } = &events[1] else {
        panic!("expected nok, got {:?}", events[1]);
    };
    assert_eq!(*kind, OperationKind::Publish);
    assert_eq!(error.to_string(), "Error 500 (Whoops)");
}

#[tokio::test]
async fn update_puts_only_changed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/time_entries/42.json"))
        .and(body_json(json!({ "time_entry": { "comments": "I win", "hours": 2.0 } })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dispatch = RecordingDispatch::new();
    let mut original = draft_entry();
    original.id = Some(42);
    let patch = TimeEntryPatch {
        comments: Some("I win".to_string()),
        hours: Some(2.0),
        ..Default::default()
    };
    gateway(&server).update(&context(dispatch.clone()), &original, &patch).await;

    let events = dispatch.notifications();
    let Notification::Ok { payload, .. } = &events[1] else {
        panic!("expected ok, got {:?}", events[1]);
    };
    assert_eq!(payload["comments"], "I win");
    assert_eq!(payload["hours"], 2.0);
    assert_eq!(payload["spent_on"], "2024-01-01");
}

#[tokio::test]
async fn remove_reports_synthesized_receipt() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/time_entries/42.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let dispatch = RecordingDispatch::new();
    gateway(&server).remove(&context(dispatch.clone()), 42, 7).await;

    assert_eq!(
        dispatch.notifications(),
        vec![
            Notification::start(OperationKind::Delete),
            Notification::ok(OperationKind::Delete, json!({ "time_entry_id": 42, "issue_id": 7 })),
        ]
    );
}

#[tokio::test]
async fn list_sends_paging_and_scope_parameters() {
    let server = MockServer::start().await;
    let paged = json!({ "time_entries": [], "total_count": 0, "offset": 0, "limit": 20 });
    Mock::given(method("GET"))
        .and(path("/time_entries.json"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "20"))
        .and(query_param("project_id", "2"))
        .and(query_param("issue_id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paged.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let dispatch = RecordingDispatch::new();
    let query = ListQuery { issue_id: 1, project_id: 2, offset: 0, limit: 20 };
    gateway(&server).list(&context(dispatch.clone()), query).await;

    assert_eq!(
        dispatch.notifications(),
        vec![
            Notification::start(OperationKind::GetAll),
            Notification::ok(OperationKind::GetAll, paged),
        ]
    );
}

#[tokio::test]
async fn connection_failure_normalizes_to_status_zero() {
    // bind then drop so the port is unoccupied
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport =
        RestTransport::new(&RestTransportConfig::new(format!("http://{addr}"), "multipass"))
            .expect("transport");
    let gateway = TimeEntryGateway::new(Arc::new(transport));

    let dispatch = RecordingDispatch::new();
    gateway.remove(&context(dispatch.clone()), 1, 1).await;

    let events = dispatch.notifications();
    let Notification::Nok { error, .. } = &events[1] else {
        panic!("expected nok, got {:?}", events[1]);
    };
    assert_eq!(error.status, 0);
    assert!(error.to_string().starts_with("Error 0 ("));
}

/// Full flow: track time against an issue, stop, then publish the accrued
/// duration as a time entry.
#[tokio::test]
async fn stop_then_publish_flow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/time_entries.json"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "time_entry": { "id": 9 } })))
        .expect(1)
        .mount(&server)
        .await;

    let dispatch = RecordingDispatch::new();
    let issue = NamedRef::named(1, "Fix the flux capacitor");

    let mut tracker = TimeTracker::new(dispatch.clone());
    // restore a previously accrued half hour, then stop straight away
    tracker.start_from(issue.clone(), 30 * 60 * 1000).unwrap();
    let elapsed_ms = tracker.stop().await.unwrap();
    assert_eq!(elapsed_ms, 30 * 60 * 1000);

    let entry = TimeEntry {
        id: None,
        issue,
        user: NamedRef::new(1),
        activity: NamedRef::new(1),
        spent_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        hours: elapsed_ms as f64 / 3_600_000.0,
        comments: String::new(),
    };
    entry.validate().unwrap();
    gateway(&server).publish(&context(dispatch.clone()), &entry).await;

    let notifications = dispatch.notifications();
    assert_eq!(notifications[0], Notification::start(OperationKind::Publish));
    assert!(notifications[1].is_terminal());

    let request = &server.received_requests().await.unwrap()[0];
    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body["time_entry"]["hours"], 0.5);
}
