//! Department Repository

use serde_json::{Map, Value};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::info;

use super::{BaseRepository, RepoError, RepoResult, validate_update_fields};
use crate::db::models::department::SPEC;
use crate::db::models::{Department, DepartmentUpdate, KeyValue};
use crate::db::query::{ListParams, Page};

pub struct DepartmentRepository {
    base: BaseRepository,
}

impl DepartmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn list(&self, params: &ListParams) -> RepoResult<Page<Department>> {
        self.base.list(&SPEC, params).await
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Department>> {
        self.base.find_by_key(&SPEC, &KeyValue::Int(id)).await
    }

    pub async fn create(&self, data: Department) -> RepoResult<Department> {
        let created = self
            .base
            .create_unique(&SPEC, &KeyValue::Int(data.department_id), &data)
            .await?;
        info!(department_id = created.department_id, "Department created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, patch: Map<String, Value>) -> RepoResult<Department> {
        validate_update_fields(&patch, SPEC.updatable)?;
        let typed: DepartmentUpdate = serde_json::from_value(Value::Object(patch))
            .map_err(|e| RepoError::Validation(e.to_string()))?;
        let merge =
            serde_json::to_value(&typed).map_err(|e| RepoError::Database(e.to_string()))?;

        self.base
            .merge_by_key(&SPEC, &KeyValue::Int(id), merge)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Department {id} not found")))
    }

    pub async fn delete(&self, id: i64) -> RepoResult<Department> {
        let deleted = self
            .base
            .delete_by_key::<Department>(&SPEC, &KeyValue::Int(id))
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Department {id} not found")))?;
        info!(department_id = id, "Department deleted");
        Ok(deleted)
    }

    pub async fn expand(&self, department: &Department, children: &[&str]) -> RepoResult<Value> {
        let mut value =
            serde_json::to_value(department).map_err(|e| RepoError::Database(e.to_string()))?;
        self.base
            .expand_children(
                &SPEC,
                &KeyValue::Int(department.department_id),
                &mut value,
                children,
            )
            .await?;
        Ok(value)
    }
}
