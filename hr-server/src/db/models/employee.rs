//! Employee Model

use serde::{Deserialize, Serialize};

use super::{AttrType, EntitySpec, RelationSpec};

/// Employee record. `EmployeeId` is the business key; `ManagerId` and
/// `DepartmentId` are weak references (lookup only, no ownership).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Employee {
    pub employee_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub hire_date: String,
    pub job_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub employee_rating: i64,
}

/// Update payload. The business key is absent on purpose: `EmployeeId`
/// is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_rating: Option<i64>,
}

pub static SPEC: EntitySpec = EntitySpec {
    table: "employee",
    key_field: "EmployeeId",
    searchable: &[
        ("EmployeeId", AttrType::Number),
        ("FirstName", AttrType::Text),
        ("LastName", AttrType::Text),
        ("Email", AttrType::Text),
        ("PhoneNumber", AttrType::Text),
        ("JobId", AttrType::Text),
        ("Salary", AttrType::Number),
        ("ManagerId", AttrType::Number),
        ("DepartmentId", AttrType::Number),
        ("EmployeeRating", AttrType::Number),
    ],
    updatable: &[
        "FirstName",
        "LastName",
        "Email",
        "PhoneNumber",
        "HireDate",
        "JobId",
        "Salary",
        "CommissionPct",
        "ManagerId",
        "DepartmentId",
        "EmployeeRating",
    ],
    sortable: &[
        "EmployeeId",
        "FirstName",
        "LastName",
        "Email",
        "PhoneNumber",
        "HireDate",
        "JobId",
        "Salary",
        "CommissionPct",
        "ManagerId",
        "DepartmentId",
        "EmployeeRating",
    ],
    relations: &[RelationSpec {
        name: "directs",
        child_table: "employee",
        foreign_key: "ManagerId",
        sort_field: "EmployeeId",
    }],
};
