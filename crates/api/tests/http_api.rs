//! HTTP-level tests that run without a database.
//!
//! The router is built over a lazy pool that never connects, so every
//! assertion here is about behaviour that happens before storage is
//! touched: health degradation, authentication rejection, and request
//! validation. If a handler under test reached the database, the lazy
//! pool would turn the response into a 500 and fail the assertion.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get, lazy_pool, send_json, token_for};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: GET /health reports degraded when the database is unreachable
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_degraded_without_database() {
    let app = common::build_test_app(lazy_pool());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["db_healthy"], false);
    assert!(body["version"].is_string());
}

// ---------------------------------------------------------------------------
// Test: unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app(lazy_pool());
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: responses carry an x-request-id header
// ---------------------------------------------------------------------------

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = common::build_test_app(lazy_pool());
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

// ---------------------------------------------------------------------------
// Test: PUT /events/{id} without a bearer token is 401
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_without_bearer_is_unauthorized() {
    let app = common::build_test_app(lazy_pool());
    let response = send_json(
        app,
        Method::PUT,
        "/api/v1/events/1",
        None,
        json!({ "location": "Hall B" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

// ---------------------------------------------------------------------------
// Test: PUT /events/{id} with a garbage token is 401
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_with_invalid_token_is_unauthorized() {
    let app = common::build_test_app(lazy_pool());
    let response = send_json(
        app,
        Method::PUT,
        "/api/v1/events/1",
        Some("not-a-valid-jwt"),
        json!({ "location": "Hall B" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

// ---------------------------------------------------------------------------
// Test: an empty update patch is rejected before storage is reached
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_update_patch_is_rejected_before_storage() {
    let app = common::build_test_app(lazy_pool());
    let token = token_for(1);

    // The pool cannot connect, so a 400 here proves the request never
    // reached the store.
    let response = send_json(
        app,
        Method::PUT,
        "/api/v1/events/1",
        Some(&token),
        json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: authenticated-only listing rejects anonymous callers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn my_events_requires_authentication() {
    let app = common::build_test_app(lazy_pool());
    let response = get(app, "/api/v1/events/mine").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

// ---------------------------------------------------------------------------
// Test: registration validation fires before storage is reached
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_rejects_short_password_before_storage() {
    let app = common::build_test_app(lazy_pool());
    let response = send_json(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        json!({
            "username": "sam",
            "email": "sam@example.edu",
            "password": "short"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: registration rejects an email without an @
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_rejects_invalid_email_before_storage() {
    let app = common::build_test_app(lazy_pool());
    let response = send_json(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        json!({
            "username": "sam",
            "email": "not-an-address",
            "password": "long-enough-password"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
