//! Location API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;

use crate::api::ExpandParams;
use crate::core::ServerState;
use crate::db::models::Location;
use crate::db::query::{ListParams, Page, parse_children};
use crate::db::repository::LocationRepository;
use crate::utils::validation::{MAX_COUNTRY_ID_LEN, MAX_POSTAL_CODE_LEN};
use crate::utils::{AppError, AppResult, validation};

fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse()
        .map_err(|_| AppError::not_found(format!("Location {raw} not found")))
}

/// List locations with sort/filter/pagination
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Location>>> {
    let repo = LocationRepository::new(state.get_db());
    Ok(Json(repo.list(&params).await?))
}

/// Get one location, optionally with `children=departments` expanded
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(params): Query<ExpandParams>,
) -> AppResult<Json<Value>> {
    let location_id = parse_id(&id)?;
    let repo = LocationRepository::new(state.get_db());
    let location = repo
        .find_by_id(location_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Location {id} not found")))?;

    let children_raw = params.children.unwrap_or_default();
    let body = repo
        .expand(&location, &parse_children(&children_raw))
        .await?;
    Ok(Json(body))
}

/// Create a location
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<Location>)> {
    let data: Location = serde_json::from_value(payload)
        .map_err(|e| AppError::validation(format!("Malformed location payload: {e}")))?;
    validation::validate_optional_text(&data.postal_code, "PostalCode", MAX_POSTAL_CODE_LEN)?;
    validation::validate_optional_text(&data.country_id, "CountryId", MAX_COUNTRY_ID_LEN)?;

    let repo = LocationRepository::new(state.get_db());
    let created = repo.create(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Patch a location; only allowlisted attributes may change
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Location>> {
    let location_id = parse_id(&id)?;
    let patch = payload
        .as_object()
        .cloned()
        .ok_or_else(|| AppError::validation("Update payload must be a JSON object"))?;
    if let Some(postal) = patch.get("PostalCode").and_then(Value::as_str) {
        validation::validate_required_text(postal, "PostalCode", MAX_POSTAL_CODE_LEN)?;
    }
    if let Some(country) = patch.get("CountryId").and_then(Value::as_str) {
        validation::validate_required_text(country, "CountryId", MAX_COUNTRY_ID_LEN)?;
    }

    let repo = LocationRepository::new(state.get_db());
    Ok(Json(repo.update(location_id, patch).await?))
}

/// Delete a location, returning the removed record
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Location>> {
    let location_id = parse_id(&id)?;
    let repo = LocationRepository::new(state.get_db());
    Ok(Json(repo.delete(location_id).await?))
}
