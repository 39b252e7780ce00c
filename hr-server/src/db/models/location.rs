//! Location Model

use serde::{Deserialize, Serialize};

use super::{AttrType, EntitySpec, RelationSpec};

/// Location record. The `departments` relation is derived: all
/// departments whose `LocationId` matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    pub location_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
}

/// Update payload; `LocationId` is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct LocationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
}

pub static SPEC: EntitySpec = EntitySpec {
    table: "location",
    key_field: "LocationId",
    searchable: &[
        ("LocationId", AttrType::Number),
        ("StreetAddress", AttrType::Text),
        ("PostalCode", AttrType::Text),
        ("City", AttrType::Text),
        ("StateProvince", AttrType::Text),
        ("CountryId", AttrType::Text),
    ],
    updatable: &[
        "StreetAddress",
        "PostalCode",
        "City",
        "StateProvince",
        "CountryId",
    ],
    sortable: &[
        "LocationId",
        "StreetAddress",
        "PostalCode",
        "City",
        "StateProvince",
        "CountryId",
    ],
    relations: &[RelationSpec {
        name: "departments",
        child_table: "department",
        foreign_key: "LocationId",
        sort_field: "DepartmentId",
    }],
};
