//! HTTP API tests against the full router.
//!
//! Requests go through `tower::ServiceExt::oneshot`; no socket is bound.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use helpdesk_core::{RulesVariant, Ticket, TicketId, TicketService, TicketStatus};
use helpdesk_testing::fixtures;
use helpdesk_web::error::ErrorResponse;
use helpdesk_web::{build_router, AppState, CORRELATION_ID_HEADER};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(variant: RulesVariant) -> Router {
    let store = fixtures::memory_store();
    build_router(AppState::new(TicketService::new(store, variant)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn printer_jam() -> Value {
    json!({
        "title": "Printer jam",
        "description": "Paper stuck in tray 2",
        "requester_id": 1,
        "priority": "LOW",
        "topic": "OTHER",
        "status": "COMPLETED"
    })
}

async fn create(app: &Router) -> Ticket {
    let (status, body) = send(app, Method::POST, "/tickets", Some(printer_jam())).await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&body).unwrap()
}

async fn patch(app: &Router, id: TicketId, body: Value) -> (StatusCode, Vec<u8>) {
    send(app, Method::PATCH, &format!("/tickets/{id}"), Some(body)).await
}

fn error_code(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorResponse>(body).unwrap().code
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(RulesVariant::Enforced), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_ignores_status_and_uses_client_field_names() {
    let app = app(RulesVariant::Enforced);
    let (status, body) = send(&app, Method::POST, "/tickets", Some(printer_jam())).await;

    assert_eq!(status, StatusCode::CREATED);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "CREATED");
    assert_eq!(body["assignee_id"], Value::Null);
    assert_eq!(body["requester_id"], 1);
    assert_eq!(body["createdAt"], "2025-01-01T00:00:00Z");
}

#[tokio::test]
async fn test_create_with_missing_field_is_bad_request() {
    let app = app(RulesVariant::Enforced);
    let (status, body) = send(
        &app,
        Method::POST,
        "/tickets",
        Some(json!({ "title": "Printer jam", "description": "...", "priority": "LOW", "topic": "OTHER" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_with_unknown_priority_is_bad_request() {
    let app = app(RulesVariant::Enforced);
    let mut body = printer_jam();
    body["priority"] = json!("URGENT");

    let (status, _) = send(&app, Method::POST, "/tickets", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_with_blank_title_is_bad_request() {
    let app = app(RulesVariant::Enforced);
    let mut body = printer_jam();
    body["title"] = json!("");

    let (status, body) = send(&app, Method::POST, "/tickets", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = app(RulesVariant::Enforced);
    let (status, _) = send(&app, Method::GET, "/tickets/42", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = app(RulesVariant::Enforced);
    let id = TicketId::new();

    let (status, _) = send(&app, Method::GET, &format!("/tickets/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = patch(&app, id, json!({ "title": "x" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[tokio::test]
async fn test_status_lifecycle_over_http() {
    let app = app(RulesVariant::Enforced);
    let ticket = create(&app).await;

    let (status, body) = patch(&app, ticket.id, json!({ "status": "IN_PROGRESS" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "MISSING_ASSIGNEE");

    let (status, body) = patch(
        &app,
        ticket.id,
        json!({ "assignee_id": 7, "status": "IN_PROGRESS" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let started: Ticket = serde_json::from_slice(&body).unwrap();
    assert_eq!(started.status, TicketStatus::InProgress);
    assert_eq!(started.assignee_id.map(|a| a.get()), Some(7));

    let (status, body) = patch(&app, ticket.id, json!({ "assignee_id": null })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "MISSING_ASSIGNEE");

    let (status, _) = patch(&app, ticket.id, json!({ "status": "COMPLETED" })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = patch(&app, ticket.id, json!({ "status": "IN_PROGRESS" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.code, "INVALID_TRANSITION");
    assert!(error.message.contains("COMPLETED"));
    assert!(error.message.contains("IN_PROGRESS"));
}

#[tokio::test]
async fn test_patch_with_unknown_status_is_bad_request() {
    let app = app(RulesVariant::Enforced);
    let ticket = create(&app).await;

    let (status, _) = patch(&app, ticket.id, json!({ "status": "DONE" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = patch(&app, ticket.id, json!({ "assignee_id": "seven" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_is_refused_under_enforced_rules() {
    let app = app(RulesVariant::Enforced);
    let ticket = create(&app).await;

    for id in [ticket.id, TicketId::new()] {
        let (status, body) = send(&app, Method::DELETE, &format!("/tickets/{id}"), None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(error_code(&body), "METHOD_NOT_ALLOWED");
    }

    let (status, body) = send(&app, Method::GET, "/tickets", None).await;
    assert_eq!(status, StatusCode::OK);
    let tickets: Vec<Ticket> = serde_json::from_slice(&body).unwrap();
    assert_eq!(tickets, vec![ticket]);
}

#[tokio::test]
async fn test_delete_under_legacy_rules() {
    let app = app(RulesVariant::Legacy);
    let ticket = create(&app).await;
    let uri = format!("/tickets/{}", ticket.id);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_newest_first() {
    let app = app(RulesVariant::Enforced);
    let first = create(&app).await;
    let second = create(&app).await;

    let (_, body) = send(&app, Method::GET, "/tickets", None).await;
    let tickets: Vec<Ticket> = serde_json::from_slice(&body).unwrap();
    let ids: Vec<TicketId> = tickets.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn test_responses_carry_correlation_id() {
    let app = app(RulesVariant::Enforced);
    let request = Request::builder()
        .uri("/tickets")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
}
