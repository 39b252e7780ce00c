//! Job Model

use serde::{Deserialize, Serialize};

use super::{AttrType, EntitySpec};

/// Job record. `JobId` is a textual business key; jobs expose no child
/// relations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Job {
    pub job_id: String,
    pub job_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_salary: Option<f64>,
}

/// Update payload; `JobId` is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_salary: Option<f64>,
}

pub static SPEC: EntitySpec = EntitySpec {
    table: "job",
    key_field: "JobId",
    searchable: &[
        ("JobId", AttrType::Text),
        ("JobTitle", AttrType::Text),
        ("MinSalary", AttrType::Number),
        ("MaxSalary", AttrType::Number),
    ],
    updatable: &["JobTitle", "MinSalary", "MaxSalary"],
    sortable: &["JobId", "JobTitle", "MinSalary", "MaxSalary"],
    relations: &[],
};
