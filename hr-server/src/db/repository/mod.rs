//! Repository layer
//!
//! One thin typed repository per collection, all delegating to
//! [`BaseRepository`] for the generic CRUD and list operations. Records
//! are addressed by their business key (`EmployeeId`, `JobId`, ...),
//! never by storage-level record ids.

pub mod department;
pub mod employee;
pub mod job;
pub mod user;
pub mod location;

pub use department::DepartmentRepository;
pub use employee::EmployeeRepository;
pub use job::JobRepository;
pub use location::LocationRepository;
pub use user::UserRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use super::models::{EntitySpec, KeyValue, RelationSpec};
use super::query::{ListParams, ListQuery, Page, build_list_query};
use crate::utils::AppError;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Reject a merge payload that names attributes outside the entity's
/// update allowlist. The whole request fails; no partial update happens.
pub fn validate_update_fields(patch: &Map<String, Value>, allowed: &[&str]) -> RepoResult<()> {
    let all_allowed = patch.keys().all(|k| allowed.contains(&k.as_str()));
    if !all_allowed {
        return Err(RepoError::Validation(
            "Attempting to update restricted or non-existent attributes".to_string(),
        ));
    }
    Ok(())
}

/// Shared database handle with the generic per-collection operations.
#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    fn key_bind(key: &KeyValue) -> Value {
        match key {
            KeyValue::Int(v) => Value::from(*v),
            KeyValue::Text(v) => Value::from(v.clone()),
        }
    }

    /// Run a built list query: items plus exact match count.
    pub async fn list<T>(&self, spec: &EntitySpec, params: &ListParams) -> RepoResult<Page<T>>
    where
        T: DeserializeOwned,
    {
        let ListQuery {
            sql,
            count_sql,
            binds,
        } = build_list_query(spec, params)?;

        let mut query = self.db.query(sql).query(count_sql);
        if let Some(text) = binds.text {
            query = query.bind(("filter_text", text));
        }
        if let Some(number) = binds.number {
            query = query.bind(("filter_number", number));
        }

        let mut response = query.await?;
        let items: Vec<T> = response.take(0)?;

        #[derive(serde::Deserialize)]
        struct CountRow {
            count: u64,
        }
        let counts: Vec<CountRow> = response.take(1)?;
        let estimated_count = counts.first().map(|row| row.count).unwrap_or(0);

        Ok(Page {
            items,
            estimated_count,
        })
    }

    pub async fn find_by_key<T>(&self, spec: &EntitySpec, key: &KeyValue) -> RepoResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let sql = format!(
            "SELECT * FROM {} WHERE {} = $key LIMIT 1",
            spec.table, spec.key_field
        );
        let mut response = self.db.query(sql).bind(("key", Self::key_bind(key))).await?;
        let rows: Vec<T> = response.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Create a record, enforcing business-key uniqueness up front so a
    /// duplicate surfaces as [`RepoError::Duplicate`] rather than an
    /// opaque index violation.
    pub async fn create_unique<T>(
        &self,
        spec: &EntitySpec,
        key: &KeyValue,
        data: &T,
    ) -> RepoResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        if self.find_by_key::<T>(spec, key).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "{} '{}' already exists",
                spec.key_field, key
            )));
        }

        let content =
            serde_json::to_value(data).map_err(|e| RepoError::Database(e.to_string()))?;
        let sql = format!("CREATE {} CONTENT $data RETURN AFTER", spec.table);
        let mut response = self.db.query(sql).bind(("data", content)).await?;
        let created: Option<T> = response.take(0)?;
        created.ok_or_else(|| {
            RepoError::Database(format!("Create returned no record for {}", spec.table))
        })
    }

    /// Merge an already-validated patch into the record with the given
    /// business key.
    pub async fn merge_by_key<T>(
        &self,
        spec: &EntitySpec,
        key: &KeyValue,
        patch: Value,
    ) -> RepoResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let sql = format!(
            "UPDATE {} MERGE $patch WHERE {} = $key RETURN AFTER",
            spec.table, spec.key_field
        );
        let mut response = self
            .db
            .query(sql)
            .bind(("patch", patch))
            .bind(("key", Self::key_bind(key)))
            .await?;
        let rows: Vec<T> = response.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Delete by business key, returning the removed record when it
    /// existed.
    pub async fn delete_by_key<T>(
        &self,
        spec: &EntitySpec,
        key: &KeyValue,
    ) -> RepoResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let Some(existing) = self.find_by_key::<T>(spec, key).await? else {
            return Ok(None);
        };
        let sql = format!("DELETE {} WHERE {} = $key", spec.table, spec.key_field);
        self.db
            .query(sql)
            .bind(("key", Self::key_bind(key)))
            .await?;
        Ok(Some(existing))
    }

    /// Load the children of one relation, sorted ascending by the
    /// child's business key.
    pub async fn fetch_children(
        &self,
        relation: &RelationSpec,
        key: &KeyValue,
    ) -> RepoResult<Vec<Value>> {
        let sql = format!(
            "SELECT * OMIT id FROM {} WHERE {} = $key ORDER BY {} ASC",
            relation.child_table, relation.foreign_key, relation.sort_field
        );
        let mut response = self.db.query(sql).bind(("key", Self::key_bind(key))).await?;
        let rows: Vec<Value> = response.take(0)?;
        Ok(rows)
    }

    /// Attach requested child arrays onto an already-serialized entity.
    /// Names with no matching relation are ignored.
    pub async fn expand_children(
        &self,
        spec: &EntitySpec,
        key: &KeyValue,
        entity: &mut Value,
        children: &[&str],
    ) -> RepoResult<()> {
        for &name in children {
            if let Some(relation) = spec.relation(name) {
                let rows = self.fetch_children(relation, key).await?;
                entity[relation.name] = Value::Array(rows);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn allowlisted_patch_passes() {
        let patch = json!({"Salary": 100.0, "LastName": "Smith"});
        let allowed = ["Salary", "LastName", "Email"];
        assert!(validate_update_fields(patch.as_object().unwrap(), &allowed).is_ok());
    }

    #[test]
    fn restricted_attribute_fails_whole_patch() {
        let patch = json!({"Salary": 100.0, "EmployeeId": 7});
        let allowed = ["Salary", "LastName"];
        let err = validate_update_fields(patch.as_object().unwrap(), &allowed).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[test]
    fn repo_errors_map_to_api_errors() {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let cases = [
            (RepoError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (RepoError::Duplicate("x".into()), StatusCode::CONFLICT),
            (RepoError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                RepoError::Database("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let app_err: AppError = err.into();
            assert_eq!(app_err.into_response().status(), status);
        }
    }
}
