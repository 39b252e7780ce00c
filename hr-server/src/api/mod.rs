//! API routing
//!
//! # Structure
//!
//! - [`users`] - account and session lifecycle
//! - [`employees`], [`departments`], [`locations`], [`jobs`] - entity
//!   collections, all role-gated with identical list/CRUD semantics
//!
//! Every route is mounted under the configured base path. Authentication
//! runs at router level; the middleware itself skips the public routes.

pub mod departments;
pub mod employees;
pub mod jobs;
pub mod locations;
pub mod users;

use axum::{Router, middleware};
use serde::Deserialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// `children=` expansion parameter shared by the single-entity handlers.
#[derive(Debug, Deserialize)]
pub struct ExpandParams {
    pub children: Option<String>,
}

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(users::router())
        .merge(employees::router())
        .merge(departments::router())
        .merge(locations::router())
        .merge(jobs::router())
}

/// Build the complete application: routes under the base path, guard,
/// state, and the tower-http layers.
pub fn build_app(state: ServerState) -> Router {
    let api = build_router();

    let routed = if state.config.base_path.is_empty() {
        api
    } else {
        Router::<ServerState>::new().nest(&state.config.base_path, api)
    };

    routed
        // Applied at router level; require_auth skips the public routes itself
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}
