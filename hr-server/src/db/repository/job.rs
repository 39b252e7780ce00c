//! Job Repository

use serde_json::{Map, Value};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::info;

use super::{BaseRepository, RepoError, RepoResult, validate_update_fields};
use crate::db::models::job::SPEC;
use crate::db::models::{Job, JobUpdate, KeyValue};
use crate::db::query::{ListParams, Page};

pub struct JobRepository {
    base: BaseRepository,
}

impl JobRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn list(&self, params: &ListParams) -> RepoResult<Page<Job>> {
        self.base.list(&SPEC, params).await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Job>> {
        self.base
            .find_by_key(&SPEC, &KeyValue::Text(id.to_string()))
            .await
    }

    pub async fn create(&self, data: Job) -> RepoResult<Job> {
        let created = self
            .base
            .create_unique(&SPEC, &KeyValue::Text(data.job_id.clone()), &data)
            .await?;
        info!(job_id = %created.job_id, "Job created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, patch: Map<String, Value>) -> RepoResult<Job> {
        validate_update_fields(&patch, SPEC.updatable)?;
        let typed: JobUpdate = serde_json::from_value(Value::Object(patch))
            .map_err(|e| RepoError::Validation(e.to_string()))?;
        let merge =
            serde_json::to_value(&typed).map_err(|e| RepoError::Database(e.to_string()))?;

        self.base
            .merge_by_key(&SPEC, &KeyValue::Text(id.to_string()), merge)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Job {id} not found")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<Job> {
        let deleted = self
            .base
            .delete_by_key::<Job>(&SPEC, &KeyValue::Text(id.to_string()))
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Job {id} not found")))?;
        info!(job_id = %id, "Job deleted");
        Ok(deleted)
    }
}
