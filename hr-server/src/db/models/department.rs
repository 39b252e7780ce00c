//! Department Model

use serde::{Deserialize, Serialize};

use super::{AttrType, EntitySpec, RelationSpec};

/// Department record. `ManagerId` and `LocationId` are weak references.
/// The `employees` relation is derived: all employees whose
/// `DepartmentId` matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Department {
    pub department_id: i64,
    pub department_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
}

/// Update payload; `DepartmentId` is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct DepartmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
}

pub static SPEC: EntitySpec = EntitySpec {
    table: "department",
    key_field: "DepartmentId",
    searchable: &[
        ("DepartmentId", AttrType::Number),
        ("DepartmentName", AttrType::Text),
        ("ManagerId", AttrType::Number),
        ("LocationId", AttrType::Number),
    ],
    updatable: &["DepartmentName", "ManagerId", "LocationId"],
    sortable: &["DepartmentId", "DepartmentName", "ManagerId", "LocationId"],
    relations: &[RelationSpec {
        name: "employees",
        child_table: "employee",
        foreign_key: "DepartmentId",
        sort_field: "EmployeeId",
    }],
};
