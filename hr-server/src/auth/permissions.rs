//! Role definitions and the role-to-verb permission matrix.
//!
//! Access control is a static table: each HR role maps to the set of HTTP
//! verbs it may use against the entity collections. The user/account
//! collection bypasses the matrix entirely (self-service account operations
//! are always allowed once authenticated).

use http::Method;
use serde::{Deserialize, Serialize};

/// HR roles, as stored on the user document and serialized on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "HR_ADMIN")]
    HrAdmin,
    #[serde(rename = "HR_MANAGER")]
    HrManager,
    #[serde(rename = "HR_EMPLOYEE")]
    HrEmployee,
}

static ADMIN_VERBS: &[Method] = &[Method::GET, Method::POST, Method::PATCH, Method::DELETE];
static MANAGER_VERBS: &[Method] = &[Method::GET, Method::POST, Method::PATCH];
static EMPLOYEE_VERBS: &[Method] = &[Method::GET];

impl Role {
    /// The verbs this role may use against the entity collections.
    pub fn allowed_verbs(&self) -> &'static [Method] {
        match self {
            Role::HrAdmin => ADMIN_VERBS,
            Role::HrManager => MANAGER_VERBS,
            Role::HrEmployee => EMPLOYEE_VERBS,
        }
    }

    /// Whether this role may use the given verb against an entity collection.
    pub fn can(&self, method: &Method) -> bool {
        self.allowed_verbs().contains(method)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::HrAdmin => "HR_ADMIN",
            Role::HrManager => "HR_MANAGER",
            Role::HrEmployee => "HR_EMPLOYEE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_all_verbs() {
        for m in [Method::GET, Method::POST, Method::PATCH, Method::DELETE] {
            assert!(Role::HrAdmin.can(&m));
        }
    }

    #[test]
    fn manager_cannot_delete() {
        assert!(Role::HrManager.can(&Method::GET));
        assert!(Role::HrManager.can(&Method::POST));
        assert!(Role::HrManager.can(&Method::PATCH));
        assert!(!Role::HrManager.can(&Method::DELETE));
    }

    #[test]
    fn employee_is_read_only() {
        assert!(Role::HrEmployee.can(&Method::GET));
        for m in [Method::POST, Method::PATCH, Method::DELETE] {
            assert!(!Role::HrEmployee.can(&m));
        }
    }

    #[test]
    fn role_round_trips_through_serde() {
        let json = serde_json::to_string(&Role::HrManager).unwrap();
        assert_eq!(json, "\"HR_MANAGER\"");
        let role: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(role, Role::HrManager);
    }
}
