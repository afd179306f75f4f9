//! HTTP API Layer
//!
//! REST API for the campus lost-and-found system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: identity, items, claims, dashboard statistics
//! - **Middleware**: JWT authentication (resolving the [`Actor`] once per
//!   request), audit logging
//! - **DTOs**: request/response objects with the uniform envelope
//! - **Error Handling**: one `{"status": "error", "message"}` shape for
//!   every failure
//!
//! [`Actor`]: core_kernel::Actor

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use infra_mail::DispatcherHandle;

use crate::config::ApiConfig;
use crate::handlers::{auth as auth_handlers, claims, health, items, stats};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
    /// Wakes the outbox dispatcher after an approval commits
    pub outbox: DispatcherHandle,
}

/// Creates the main API router
pub fn create_router(pool: PgPool, config: ApiConfig, outbox: DispatcherHandle) -> Router {
    let state = AppState {
        pool,
        config,
        outbox,
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/v1/auth/register", post(auth_handlers::register))
        .route("/api/v1/auth/login", post(auth_handlers::login));

    // Item routes
    let item_routes = Router::new()
        .route("/", post(items::create_item))
        .route("/", get(items::list_items))
        .route("/:id", get(items::get_item))
        .route("/:id/resolve", post(items::resolve_item));

    // Claim routes for regular accounts
    let claim_routes = Router::new()
        .route("/", post(claims::create_claim))
        .route("/", get(claims::list_my_claims));

    // Admin review routes
    let admin_routes = Router::new()
        .route("/claims", get(claims::list_claims))
        .route("/claims/:id/resolve", post(claims::resolve_claim));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/items", item_routes)
        .nest("/claims", claim_routes)
        .nest("/admin", admin_routes)
        .route("/stats", get(stats::stats))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
