//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;

use crate::api::ExpandParams;
use crate::core::ServerState;
use crate::db::models::Employee;
use crate::db::query::{ListParams, Page, parse_children};
use crate::db::repository::EmployeeRepository;
use crate::utils::{AppError, AppResult, validation};

fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse()
        .map_err(|_| AppError::not_found(format!("Employee {raw} not found")))
}

/// List employees with sort/filter/pagination
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Employee>>> {
    let repo = EmployeeRepository::new(state.get_db());
    Ok(Json(repo.list(&params).await?))
}

/// Get one employee, optionally with `children=directs` expanded
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(params): Query<ExpandParams>,
) -> AppResult<Json<Value>> {
    let employee_id = parse_id(&id)?;
    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo
        .find_by_id(employee_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;

    let children_raw = params.children.unwrap_or_default();
    let body = repo.expand(&employee, &parse_children(&children_raw)).await?;
    Ok(Json(body))
}

/// Create an employee
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let data: Employee = serde_json::from_value(payload)
        .map_err(|e| AppError::validation(format!("Malformed employee payload: {e}")))?;
    validation::validate_email(data.email.trim(), "Email")?;

    let repo = EmployeeRepository::new(state.get_db());
    let created = repo.create(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Patch an employee; only allowlisted attributes may change
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Employee>> {
    let employee_id = parse_id(&id)?;
    let patch = payload
        .as_object()
        .cloned()
        .ok_or_else(|| AppError::validation("Update payload must be a JSON object"))?;
    if let Some(email) = patch.get("Email").and_then(Value::as_str) {
        validation::validate_email(email.trim(), "Email")?;
    }

    let repo = EmployeeRepository::new(state.get_db());
    Ok(Json(repo.update(employee_id, patch).await?))
}

/// Delete an employee, returning the removed record
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let employee_id = parse_id(&id)?;
    let repo = EmployeeRepository::new(state.get_db());
    Ok(Json(repo.delete(employee_id).await?))
}
