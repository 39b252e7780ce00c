//! User API Module
//!
//! Account and session lifecycle. These routes never carry the
//! role-to-verb matrix: signup, login, and account deletion are public,
//! and logout only needs a live session.

mod handler;

use axum::{Router, routing::delete, routing::post};

use crate::core::ServerState;

/// User router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::signup))
        .route("/login", post(handler::login))
        .route("/logout", post(handler::logout))
        .route("/logoutall", post(handler::logout_all))
        .route("/{email}", delete(handler::delete_account))
}
