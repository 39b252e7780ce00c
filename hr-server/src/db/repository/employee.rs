//! Employee Repository

use serde_json::{Map, Value};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::info;

use super::{BaseRepository, RepoError, RepoResult, validate_update_fields};
use crate::db::models::employee::SPEC;
use crate::db::models::{Employee, EmployeeUpdate, KeyValue};
use crate::db::query::{ListParams, Page};

pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn list(&self, params: &ListParams) -> RepoResult<Page<Employee>> {
        self.base.list(&SPEC, params).await
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Employee>> {
        self.base.find_by_key(&SPEC, &KeyValue::Int(id)).await
    }

    pub async fn create(&self, mut data: Employee) -> RepoResult<Employee> {
        data.email = data.email.trim().to_lowercase();
        let created = self
            .base
            .create_unique(&SPEC, &KeyValue::Int(data.employee_id), &data)
            .await?;
        info!(employee_id = created.employee_id, "Employee created");
        Ok(created)
    }

    /// Merge an allowlisted patch; the business key is never updatable.
    pub async fn update(&self, id: i64, patch: Map<String, Value>) -> RepoResult<Employee> {
        validate_update_fields(&patch, SPEC.updatable)?;
        let mut typed: EmployeeUpdate = serde_json::from_value(Value::Object(patch))
            .map_err(|e| RepoError::Validation(e.to_string()))?;
        if let Some(email) = typed.email.take() {
            typed.email = Some(email.trim().to_lowercase());
        }
        let merge =
            serde_json::to_value(&typed).map_err(|e| RepoError::Database(e.to_string()))?;

        self.base
            .merge_by_key(&SPEC, &KeyValue::Int(id), merge)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
    }

    pub async fn delete(&self, id: i64) -> RepoResult<Employee> {
        let deleted = self
            .base
            .delete_by_key::<Employee>(&SPEC, &KeyValue::Int(id))
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))?;
        info!(employee_id = id, "Employee deleted");
        Ok(deleted)
    }

    /// Serialize the record and attach the requested child arrays.
    pub async fn expand(&self, employee: &Employee, children: &[&str]) -> RepoResult<Value> {
        let mut value =
            serde_json::to_value(employee).map_err(|e| RepoError::Database(e.to_string()))?;
        self.base
            .expand_children(&SPEC, &KeyValue::Int(employee.employee_id), &mut value, children)
            .await?;
        Ok(value)
    }
}
