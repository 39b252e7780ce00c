//! Data models
//!
//! One file per collection. Each entity model declares, alongside its
//! struct, a static [`EntitySpec`]: the table name, business-key field,
//! searchable/updatable attribute tables, sortable fields, and child
//! relations. The spec tables are compile-time constants; the generic
//! query builder and the mutation path are driven entirely by them, so
//! every collection gets identical list/filter/update semantics.
//!
//! Storage identity (the SurrealDB record id) never appears on a model:
//! all lookups go through the business key, and responses never leak the
//! record id.

pub mod department;
pub mod employee;
pub mod job;
pub mod location;
pub mod user;

pub use department::{Department, DepartmentUpdate};
pub use employee::{Employee, EmployeeUpdate};
pub use job::{Job, JobUpdate};
pub use location::{Location, LocationUpdate};
pub use user::{User, UserCreate};

use std::fmt;

/// Type of a searchable attribute, deciding how the free-text filter
/// token applies to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    /// Exact numeric equality, only when the token parses as a number
    Number,
    /// Case-insensitive substring match
    Text,
}

/// A named child relation: child rows whose weak-reference field equals
/// the parent's business key.
#[derive(Debug)]
pub struct RelationSpec {
    /// Name used in the `children=` query parameter and the response key
    pub name: &'static str,
    /// Child table
    pub child_table: &'static str,
    /// Field on the child holding the parent's business key
    pub foreign_key: &'static str,
    /// Default ascending sort for the materialized rows
    pub sort_field: &'static str,
}

/// Static description of an entity collection.
#[derive(Debug)]
pub struct EntitySpec {
    /// Table name
    pub table: &'static str,
    /// Business-key field (unique, immutable)
    pub key_field: &'static str,
    /// Attributes eligible for the generic OR-filter
    pub searchable: &'static [(&'static str, AttrType)],
    /// Attributes permitted in PATCH payloads
    pub updatable: &'static [&'static str],
    /// Fields accepted in `sortBy`
    pub sortable: &'static [&'static str],
    /// Child relations available for `children=` expansion
    pub relations: &'static [RelationSpec],
}

impl EntitySpec {
    /// Look up a relation by its `children=` name.
    pub fn relation(&self, name: &str) -> Option<&'static RelationSpec> {
        self.relations.iter().find(|r| r.name == name)
    }
}

/// A business-key value: numeric for most collections, textual for jobs.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Int(v) => write!(f, "{v}"),
            KeyValue::Text(v) => write!(f, "{v}"),
        }
    }
}
