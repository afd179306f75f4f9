//! Router-level tests
//!
//! These exercise the paths that must fail before any database work:
//! authentication, the admin gate, and request validation. The pool is
//! created lazily and never connects.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use core_kernel::{Actor, Role, UserId};
use interface_api::auth::create_token;
use interface_api::config::ApiConfig;
use interface_api::create_router;

const JWT_SECRET: &str = "dev-secret-change-in-production";

fn test_app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/lostfound_test")
        .unwrap();
    create_router(pool, ApiConfig::default(), infra_mail::DispatcherHandle::disconnected())
}

fn bearer(role: Role) -> String {
    let actor = Actor::new(UserId::new(7).unwrap(), role);
    let token = create_token(actor, JWT_SECRET, 3600).unwrap();
    format!("Bearer {token}")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_is_public() {
    let response = test_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_route_requires_a_token() {
    let response = test_app()
        .oneshot(Request::get("/api/v1/items").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let response = test_app()
        .oneshot(
            Request::get("/api/v1/items")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_review_queue_rejects_non_admin_before_any_query() {
    let response = test_app()
        .oneshot(
            Request::get("/api/v1/admin/claims")
                .header(header::AUTHORIZATION, bearer(Role::User))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // The lazy pool never connects, so a 403 here proves the gate fired
    // ahead of the database.
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_resolution_rejects_non_admin() {
    let response = test_app()
        .oneshot(
            Request::post("/api/v1/admin/claims/5/resolve")
                .header(header::AUTHORIZATION, bearer(Role::User))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"decision": "approved"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_resolution_rejects_unknown_decision() {
    let response = test_app()
        .oneshot(
            Request::post("/api/v1/admin/claims/5/resolve")
                .header(header::AUTHORIZATION, bearer(Role::Admin))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"decision": "maybe"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_resolution_rejects_non_positive_claim_id() {
    let response = test_app()
        .oneshot(
            Request::post("/api/v1/admin/claims/0/resolve")
                .header(header::AUTHORIZATION, bearer(Role::Admin))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"decision": "approved"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_claim_intake_rejects_blank_justification() {
    let response = test_app()
        .oneshot(
            Request::post("/api/v1/claims")
                .header(header::AUTHORIZATION, bearer(Role::User))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"item_id": 42, "justification": "   "}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_claim_intake_rejects_non_positive_item_id() {
    let response = test_app()
        .oneshot(
            Request::post("/api/v1/claims")
                .header(header::AUTHORIZATION, bearer(Role::User))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"item_id": -1, "justification": "my backpack"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_rejects_invalid_email_shape() {
    let response = test_app()
        .oneshot(
            Request::post("/api/v1/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "full_name": "Jordan Lee",
                        "email": "not-an-email",
                        "password": "hunter2222"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
