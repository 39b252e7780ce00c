//! Guard middleware
//!
//! Two layers compose the guard:
//!
//! - [`require_auth`] runs at router level on every request. It extracts
//!   `Authorization: Bearer <token>`, verifies the signature, resolves the
//!   subject to a user, and confirms the token is still in that user's live
//!   session set. On success it injects [`CurrentUser`] and [`AuthToken`]
//!   into the request extensions.
//! - [`require_role_verb`] is layered on the entity-collection routers only
//!   and enforces the role-to-verb matrix. The user/account routes do not
//!   carry it: self-service account operations bypass the matrix.
//!
//! # Public routes (skipped by `require_auth`)
//!
//! - `OPTIONS *` (CORS preflight)
//! - anything outside the configured base path (falls through to 404)
//! - `POST {base}/users` (signup)
//! - `POST {base}/users/login`
//! - `DELETE {base}/users/{email}` (account deletion is self-service)
//!
//! # Errors
//!
//! Every authentication failure and every authorization failure is 401;
//! the API deliberately does not distinguish the two.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{JwtService, Role};
use crate::core::ServerState;
use crate::db::models::User;
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::AppError;

/// Authenticated identity, resolved from the presented token.
///
/// Injected into request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub email: String,
    pub role: Role,
    pub locale: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            role: user.role,
            locale: user.locale.clone(),
        }
    }
}

/// The exact token presented on this request.
///
/// Logout needs it to remove precisely this token from the session set.
#[derive(Debug, Clone)]
pub struct AuthToken(pub String);

/// Whether the request targets a route that must stay reachable without
/// a credential.
fn is_public_route(method: &http::Method, rel_path: &str) -> bool {
    if *method == http::Method::POST {
        rel_path == "/users" || rel_path == "/users/login"
    } else if *method == http::Method::DELETE {
        rel_path.starts_with("/users/")
    } else {
        false
    }
}

/// Authentication middleware - requires a live session token
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();

    // Allow CORS preflight without credentials
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Requests outside the API base path skip auth and 404 naturally
    let Some(rel_path) = strip_base_path(&path, &state.config.base_path) else {
        return Ok(next.run(req).await);
    };

    if is_public_route(req.method(), rel_path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    // Owned copy so the header borrow ends before the request is mutated
    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| {
                security_log!("WARN", "auth_malformed_header", uri = path.clone());
                AppError::Unauthorized
            })?
            .to_string(),
        None => {
            security_log!("WARN", "auth_missing", uri = path.clone());
            return Err(AppError::Unauthorized);
        }
    };

    // Verify signature and expiry
    let claims = state
        .get_jwt_service()
        .validate_token(&token)
        .map_err(|e| {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = path.clone()
            );
            AppError::Unauthorized
        })?;

    // The token must still be in the user's live session set; logout
    // revokes tokens long before their exp claim runs out
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_email_and_token(&claims.sub, &token)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            security_log!("WARN", "auth_revoked_or_unknown", subject = claims.sub.clone());
            AppError::Unauthorized
        })?;

    req.extensions_mut().insert(CurrentUser::from(&user));
    req.extensions_mut().insert(AuthToken(token));
    Ok(next.run(req).await)
}

/// Authorization middleware - enforces the role-to-verb matrix
///
/// Layered on the entity-collection routers, after [`require_auth`] has
/// injected the identity.
pub async fn require_role_verb(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;

    let method = req.method();
    if !user.role.can(method) {
        security_log!(
            "WARN",
            "verb_denied",
            email = user.email.clone(),
            role = user.role.as_str(),
            method = method.to_string()
        );
        return Err(AppError::forbidden(format!(
            "User is not authorized to {} data",
            method
        )));
    }

    Ok(next.run(req).await)
}

/// Strip the configured base path off a request path.
///
/// Returns the remainder (starting with `/`, or `"/"` for the base itself),
/// or None when the request is outside the base path.
fn strip_base_path<'a>(path: &'a str, base: &str) -> Option<&'a str> {
    if base.is_empty() || base == "/" {
        return Some(path);
    }
    match path.strip_prefix(base) {
        Some("") => Some("/"),
        Some(rest) if rest.starts_with('/') => Some(rest),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_path_stripping() {
        assert_eq!(
            strip_base_path("/api/v1/employees", "/api/v1"),
            Some("/employees")
        );
        assert_eq!(strip_base_path("/api/v1", "/api/v1"), Some("/"));
        assert_eq!(strip_base_path("/other/employees", "/api/v1"), None);
        assert_eq!(strip_base_path("/api/v1x/employees", "/api/v1"), None);
        assert_eq!(strip_base_path("/employees", "/"), Some("/employees"));
    }

    #[test]
    fn public_routes() {
        assert!(is_public_route(&http::Method::POST, "/users"));
        assert!(is_public_route(&http::Method::POST, "/users/login"));
        assert!(is_public_route(
            &http::Method::DELETE,
            "/users/someone@example.com"
        ));
        assert!(!is_public_route(&http::Method::POST, "/users/logout"));
        assert!(!is_public_route(&http::Method::GET, "/employees"));
    }
}
