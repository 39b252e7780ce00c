//! User API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::{AuthToken, CurrentUser};
use crate::core::ServerState;
use crate::db::models::{User, UserCreate};
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::{AppError, AppResult, validation};

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

/// Login response: the sanitized account, the freshly issued token, and
/// the session flag.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
    pub auth: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionEnd {
    pub auth: bool,
}

/// Create an account (public)
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<User>)> {
    let data: UserCreate = serde_json::from_value(payload)
        .map_err(|e| AppError::validation(format!("Malformed signup payload: {e}")))?;

    validation::validate_email(data.email.trim(), "Email")?;
    validation::validate_password(&data.password)?;

    let repo = UserRepository::new(state.get_db());
    let user = repo.create(data).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login (public)
///
/// Every failure, including a missing field, uses the same message and
/// status so the endpoint leaks nothing about which accounts exist.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<LoginResponse>> {
    let request: LoginRequest =
        serde_json::from_value(payload).map_err(|_| AppError::invalid_credentials())?;

    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(AppError::invalid_credentials());
    };
    let email = email.trim().to_lowercase();

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .authenticate(&email, &password)
        .await?
        .ok_or_else(|| {
            security_log!("WARN", "login_failed", email = email.clone());
            AppError::invalid_credentials()
        })?;

    let token = state
        .get_jwt_service()
        .generate_token(&user.email)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;
    repo.append_token(&user.email, &token).await?;

    security_log!("INFO", "login_ok", email = user.email.clone());
    Ok(Json(LoginResponse {
        user,
        token,
        auth: true,
    }))
}

/// End the current session (guarded)
pub async fn logout(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Extension(token): Extension<AuthToken>,
) -> AppResult<Json<SessionEnd>> {
    let repo = UserRepository::new(state.get_db());
    repo.remove_token(&current.email, &token.0).await?;

    security_log!("INFO", "logout", email = current.email.clone());
    Ok(Json(SessionEnd { auth: false }))
}

/// End every session of the account (guarded)
pub async fn logout_all(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<SessionEnd>> {
    let repo = UserRepository::new(state.get_db());
    repo.clear_tokens(&current.email).await?;

    security_log!("INFO", "logout_all", email = current.email.clone());
    Ok(Json(SessionEnd { auth: false }))
}

/// Delete an account by email (public)
pub async fn delete_account(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> AppResult<Json<User>> {
    let email = email.trim().to_lowercase();
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .delete_by_email(&email)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {email} not found")))?;
    Ok(Json(user))
}
