//! User Model

use serde::{Deserialize, Serialize};

use crate::auth::Role;

/// User account. `password` holds the argon2 hash and, together with the
/// live session token set, is excluded from every serialized
/// representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default, skip_serializing)]
    pub tokens: Vec<String>,
}

fn default_locale() -> String {
    "en-US".to_string()
}

/// Signup payload
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub locale: Option<String>,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = User::hash_password("hunter2hunter2").unwrap();
        let user = User {
            email: "someone@example.com".to_string(),
            password: hash,
            role: Role::HrEmployee,
            locale: "en-US".to_string(),
            tokens: vec![],
        };
        assert!(user.verify_password("hunter2hunter2").unwrap());
        assert!(!user.verify_password("wrong-password").unwrap());
    }

    #[test]
    fn serialized_user_never_exposes_secrets() {
        let user = User {
            email: "someone@example.com".to_string(),
            password: "argon2-hash".to_string(),
            role: Role::HrAdmin,
            locale: "es".to_string(),
            tokens: vec!["tok".to_string()],
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
        assert!(value.get("tokens").is_none());
        assert_eq!(value["email"], "someone@example.com");
        assert_eq!(value["role"], "HR_ADMIN");
    }
}
