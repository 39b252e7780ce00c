//! HR API Server
//!
//! Role-gated HTTP API for HR records: employees, departments,
//! locations, and jobs, plus user account and session management.
//!
//! # Module structure
//!
//! ```text
//! hr-server/src/
//! ├── core/          # configuration, state, HTTP server
//! ├── auth/          # JWT sessions, role-to-verb matrix, guard middleware
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models, query builder, repositories
//! └── utils/         # errors, validation, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService, Role};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr $(, $key:ident = $value:expr)*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event
            $(, $key = $value)*
        );
    };
}

/// Load `.env` and initialize logging from `LOG_LEVEL` / `LOG_DIR`.
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
