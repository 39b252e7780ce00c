//! Location Repository

use serde_json::{Map, Value};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::info;

use super::{BaseRepository, RepoError, RepoResult, validate_update_fields};
use crate::db::models::location::SPEC;
use crate::db::models::{KeyValue, Location, LocationUpdate};
use crate::db::query::{ListParams, Page};

pub struct LocationRepository {
    base: BaseRepository,
}

impl LocationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn list(&self, params: &ListParams) -> RepoResult<Page<Location>> {
        self.base.list(&SPEC, params).await
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Location>> {
        self.base.find_by_key(&SPEC, &KeyValue::Int(id)).await
    }

    pub async fn create(&self, data: Location) -> RepoResult<Location> {
        let created = self
            .base
            .create_unique(&SPEC, &KeyValue::Int(data.location_id), &data)
            .await?;
        info!(location_id = created.location_id, "Location created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, patch: Map<String, Value>) -> RepoResult<Location> {
        validate_update_fields(&patch, SPEC.updatable)?;
        let typed: LocationUpdate = serde_json::from_value(Value::Object(patch))
            .map_err(|e| RepoError::Validation(e.to_string()))?;
        let merge =
            serde_json::to_value(&typed).map_err(|e| RepoError::Database(e.to_string()))?;

        self.base
            .merge_by_key(&SPEC, &KeyValue::Int(id), merge)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Location {id} not found")))
    }

    pub async fn delete(&self, id: i64) -> RepoResult<Location> {
        let deleted = self
            .base
            .delete_by_key::<Location>(&SPEC, &KeyValue::Int(id))
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Location {id} not found")))?;
        info!(location_id = id, "Location deleted");
        Ok(deleted)
    }

    pub async fn expand(&self, location: &Location, children: &[&str]) -> RepoResult<Value> {
        let mut value =
            serde_json::to_value(location).map_err(|e| RepoError::Database(e.to_string()))?;
        self.base
            .expand_children(
                &SPEC,
                &KeyValue::Int(location.location_id),
                &mut value,
                children,
            )
            .await?;
        Ok(value)
    }
}
