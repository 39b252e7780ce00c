use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration.
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | DATA_DIR | ./data | Database and log storage |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | BASE_PATH | /api/v1 | Prefix every route is mounted under |
/// | JWT_SECRET | generated in development | HS256 signing secret |
/// | JWT_EXPIRATION_MINUTES | 10080 | Token lifetime |
/// | ENVIRONMENT | development | development \| staging \| production |
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the embedded database and rolling log files
    pub data_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Route prefix, normalized to a leading slash and no trailing slash
    pub base_path: String,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment name
    pub environment: String,
}

impl Config {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            base_path: normalize_base_path(
                &std::env::var("BASE_PATH").unwrap_or_else(|_| "/api/v1".into()),
            ),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Configuration for tests: isolated data directory, ephemeral port.
    pub fn with_overrides(data_dir: impl Into<String>, http_port: u16) -> Self {
        Self {
            data_dir: data_dir.into(),
            http_port,
            ..Self::from_env()
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Path of the embedded database under the data directory.
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("hr.db")
    }

    /// Path of the rolling log directory under the data directory.
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("logs")
    }
}

/// Normalize a base path: leading slash, no trailing slash. An empty or
/// root value means the API mounts at the server root.
fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_path_normalization() {
        assert_eq!(normalize_base_path("/api/v1"), "/api/v1");
        assert_eq!(normalize_base_path("api/v1/"), "/api/v1");
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path(""), "");
    }

    #[test]
    fn database_path_lives_under_data_dir() {
        let config = Config::with_overrides("/tmp/hr-test", 0);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/hr-test/hr.db"));
    }
}
