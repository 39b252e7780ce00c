//! Department API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;

use crate::api::ExpandParams;
use crate::core::ServerState;
use crate::db::models::Department;
use crate::db::query::{ListParams, Page, parse_children};
use crate::db::repository::DepartmentRepository;
use crate::utils::{AppError, AppResult};

fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse()
        .map_err(|_| AppError::not_found(format!("Department {raw} not found")))
}

/// List departments with sort/filter/pagination
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Department>>> {
    let repo = DepartmentRepository::new(state.get_db());
    Ok(Json(repo.list(&params).await?))
}

/// Get one department, optionally with `children=employees` expanded
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(params): Query<ExpandParams>,
) -> AppResult<Json<Value>> {
    let department_id = parse_id(&id)?;
    let repo = DepartmentRepository::new(state.get_db());
    let department = repo
        .find_by_id(department_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Department {id} not found")))?;

    let children_raw = params.children.unwrap_or_default();
    let body = repo
        .expand(&department, &parse_children(&children_raw))
        .await?;
    Ok(Json(body))
}

/// Create a department
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<Department>)> {
    let data: Department = serde_json::from_value(payload)
        .map_err(|e| AppError::validation(format!("Malformed department payload: {e}")))?;

    let repo = DepartmentRepository::new(state.get_db());
    let created = repo.create(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Patch a department; only allowlisted attributes may change
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Department>> {
    let department_id = parse_id(&id)?;
    let patch = payload
        .as_object()
        .cloned()
        .ok_or_else(|| AppError::validation("Update payload must be a JSON object"))?;

    let repo = DepartmentRepository::new(state.get_db());
    Ok(Json(repo.update(department_id, patch).await?))
}

/// Delete a department, returning the removed record
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Department>> {
    let department_id = parse_id(&id)?;
    let repo = DepartmentRepository::new(state.get_db());
    Ok(Json(repo.delete(department_id).await?))
}
