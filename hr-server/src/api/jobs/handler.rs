//! Job API Handlers
//!
//! Jobs use a textual business key and expose no child relations, so
//! there is no expansion parameter here.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;

use crate::core::ServerState;
use crate::db::models::Job;
use crate::db::query::{ListParams, Page};
use crate::db::repository::JobRepository;
use crate::utils::{AppError, AppResult};

/// List jobs with sort/filter/pagination
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Job>>> {
    let repo = JobRepository::new(state.get_db());
    Ok(Json(repo.list(&params).await?))
}

/// Get one job by its textual key
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Job>> {
    let repo = JobRepository::new(state.get_db());
    let job = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// Create a job
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<Job>)> {
    let data: Job = serde_json::from_value(payload)
        .map_err(|e| AppError::validation(format!("Malformed job payload: {e}")))?;

    let repo = JobRepository::new(state.get_db());
    let created = repo.create(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Patch a job; only allowlisted attributes may change
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Job>> {
    let patch = payload
        .as_object()
        .cloned()
        .ok_or_else(|| AppError::validation("Update payload must be a JSON object"))?;

    let repo = JobRepository::new(state.get_db());
    Ok(Json(repo.update(&id, patch).await?))
}

/// Delete a job, returning the removed record
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Job>> {
    let repo = JobRepository::new(state.get_db());
    Ok(Json(repo.delete(&id).await?))
}
