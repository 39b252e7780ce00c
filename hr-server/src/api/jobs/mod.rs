//! Job API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_role_verb;
use crate::core::ServerState;

/// Job router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/jobs", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_role_verb))
}
