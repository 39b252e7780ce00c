//! Database layer
//!
//! Embedded SurrealDB (RocksDB backend). The service owns the
//! connection, selects the namespace/database, and defines the unique
//! business-key indexes on startup.

pub mod models;
pub mod query;
pub mod repository;

pub use query::{ListParams, Page};
pub use repository::{
    BaseRepository, DepartmentRepository, EmployeeRepository, JobRepository, LocationRepository,
    RepoError, RepoResult, UserRepository,
};

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use tracing::info;

use crate::utils::{AppError, AppResult};

const NAMESPACE: &str = "hr";
const DATABASE: &str = "hr";

/// Owns the embedded database connection.
#[derive(Debug, Clone)]
pub struct DbService {
    db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at `path` and prepare the schema.
    pub async fn new(path: &str) -> AppResult<Self> {
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        let service = Self { db };
        service.define_indexes().await?;

        info!(path = %path, "Database connection established");
        Ok(service)
    }

    pub fn connection(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Unique indexes on every business key. Idempotent across restarts.
    async fn define_indexes(&self) -> AppResult<()> {
        let statements = [
            "DEFINE INDEX IF NOT EXISTS user_email_unique ON TABLE user FIELDS email UNIQUE",
            "DEFINE INDEX IF NOT EXISTS employee_id_unique ON TABLE employee FIELDS EmployeeId UNIQUE",
            "DEFINE INDEX IF NOT EXISTS department_id_unique ON TABLE department FIELDS DepartmentId UNIQUE",
            "DEFINE INDEX IF NOT EXISTS location_id_unique ON TABLE location FIELDS LocationId UNIQUE",
            "DEFINE INDEX IF NOT EXISTS job_id_unique ON TABLE job FIELDS JobId UNIQUE",
        ];

        for statement in statements {
            self.db
                .query(statement)
                .await
                .map_err(|e| AppError::database(format!("Failed to define index: {e}")))?;
        }
        Ok(())
    }
}
