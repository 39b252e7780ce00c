//! User Repository
//!
//! Account lifecycle and session-token bookkeeping. The token set is
//! the source of truth for live sessions: a JWT is only honored while
//! its exact string is present in the account's `tokens` array, so
//! logout revokes immediately regardless of expiry.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::info;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate};

pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create an account. The email is stored lowercased and must be
    /// unique; the password is stored as an argon2 hash only.
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        let email = data.email.trim().to_lowercase();

        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "User '{email}' already exists"
            )));
        }

        let password_hash = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Password hashing failed: {e}")))?;
        let locale = data.locale.unwrap_or_else(|| "en-US".to_string());
        let role = serde_json::to_value(data.role)
            .map_err(|e| RepoError::Database(e.to_string()))?;

        // Secrets are serde-skipped on User, so the insert binds each
        // field explicitly instead of using CONTENT.
        let mut response = self
            .base
            .db()
            .query(
                "CREATE user SET email = $email, password = $password, role = $role, \
                 locale = $locale, tokens = [] RETURN AFTER",
            )
            .bind(("email", email.clone()))
            .bind(("password", password_hash))
            .bind(("role", role))
            .bind(("locale", locale))
            .await?;

        let created: Option<User> = response.take(0)?;
        let user = created
            .ok_or_else(|| RepoError::Database("Create returned no user record".to_string()))?;

        info!(email = %email, role = %user.role.as_str(), "User account created");
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut response = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let rows: Vec<User> = response.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Resolve an account only when the presented token is still in its
    /// live session set.
    pub async fn find_by_email_and_token(
        &self,
        email: &str,
        token: &str,
    ) -> RepoResult<Option<User>> {
        let mut response = self
            .base
            .db()
            .query(
                "SELECT * FROM user WHERE email = $email AND tokens CONTAINS $session_token LIMIT 1",
            )
            .bind(("email", email.to_string()))
            .bind(("session_token", token.to_string()))
            .await?;
        let rows: Vec<User> = response.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Check credentials; `Ok(None)` for unknown email or wrong password.
    pub async fn authenticate(&self, email: &str, password: &str) -> RepoResult<Option<User>> {
        let Some(user) = self.find_by_email(email).await? else {
            return Ok(None);
        };
        let verified = user
            .verify_password(password)
            .map_err(|e| RepoError::Database(format!("Password verification failed: {e}")))?;
        Ok(verified.then_some(user))
    }

    /// Record a freshly issued session token.
    pub async fn append_token(&self, email: &str, token: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE user SET tokens += $session_token WHERE email = $email")
            .bind(("email", email.to_string()))
            .bind(("session_token", token.to_string()))
            .await?;
        Ok(())
    }

    /// Revoke one session. The removal is a single atomic array update.
    pub async fn remove_token(&self, email: &str, token: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE user SET tokens -= $session_token WHERE email = $email")
            .bind(("email", email.to_string()))
            .bind(("session_token", token.to_string()))
            .await?;
        Ok(())
    }

    /// Revoke every session of the account.
    pub async fn clear_tokens(&self, email: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE user SET tokens = [] WHERE email = $email")
            .bind(("email", email.to_string()))
            .await?;
        Ok(())
    }

    /// Remove the account, returning it when it existed.
    pub async fn delete_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let Some(user) = self.find_by_email(email).await? else {
            return Ok(None);
        };
        self.base
            .db()
            .query("DELETE user WHERE email = $email")
            .bind(("email", email.to_string()))
            .await?;
        info!(email = %email, "User account deleted");
        Ok(Some(user))
    }
}
