//! Generic list-query builder
//!
//! Turns `sortBy` / `filter` / `limit` / `skip` query parameters into a
//! SurrealQL statement pair (items + count), uniformly for every entity
//! collection. The builder is pure string assembly: field names come from
//! the compile-time [`EntitySpec`] tables, and the filter value is always
//! passed through bind parameters, never interpolated.
//!
//! # Filter semantics
//!
//! The single free-text token is applied as an OR across the entity's
//! searchable attributes: numeric attributes contribute an exact-equality
//! clause only when the token parses as a number; string attributes
//! contribute a case-insensitive substring clause. A filter with zero
//! applicable clauses matches nothing; an absent filter applies no
//! predicate at all (full collection).
//!
//! # Count semantics
//!
//! With a filter the count statement runs the same predicate without
//! limit/skip, so `estimatedCount` is the exact number of matching
//! documents. Without a filter it is a whole-collection count.

use serde::{Deserialize, Serialize};

use super::models::{AttrType, EntitySpec};
use super::repository::RepoError;

/// Query parameters accepted by every list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub filter: Option<String>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

/// List response envelope: `{items, estimatedCount}`.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(rename = "estimatedCount")]
    pub estimated_count: u64,
}

/// Bind values referenced by a built filter predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterBinds {
    /// `$filter_text`: the lowercased token, when a substring clause exists
    pub text: Option<String>,
    /// `$filter_number`: the parsed token, when an equality clause exists
    pub number: Option<f64>,
}

/// A built list query: one statement for the items, one for the count.
#[derive(Debug)]
pub struct ListQuery {
    pub sql: String,
    pub count_sql: String,
    pub binds: FilterBinds,
}

/// Build the items + count statements for a list request.
pub fn build_list_query(spec: &EntitySpec, params: &ListParams) -> Result<ListQuery, RepoError> {
    let mut binds = FilterBinds::default();

    let where_clause = match params.filter.as_deref() {
        Some(filter) => {
            let (clause, filter_binds) = build_filter_clause(filter, spec);
            binds = filter_binds;
            Some(clause)
        }
        None => None,
    };

    let order_clause = match params.sort_by.as_deref() {
        Some(sort_by) => Some(build_order_clause(sort_by, spec)?),
        None => None,
    };

    let mut sql = format!("SELECT * FROM {}", spec.table);
    let mut count_sql = format!("SELECT count() AS count FROM {}", spec.table);

    if let Some(clause) = &where_clause {
        sql.push_str(" WHERE ");
        sql.push_str(clause);
        count_sql.push_str(" WHERE ");
        count_sql.push_str(clause);
    }
    if let Some(clause) = &order_clause {
        sql.push_str(" ORDER BY ");
        sql.push_str(clause);
    }
    if let Some(limit) = params.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    if let Some(skip) = params.skip {
        sql.push_str(&format!(" START {skip}"));
    }
    count_sql.push_str(" GROUP ALL");

    Ok(ListQuery {
        sql,
        count_sql,
        binds,
    })
}

/// Build the OR predicate for a free-text filter token.
///
/// Returns the predicate and the binds it references. A token with no
/// applicable attribute yields `false` (matches nothing), which is
/// distinct from the no-filter case handled by the caller.
fn build_filter_clause(filter: &str, spec: &EntitySpec) -> (String, FilterBinds) {
    let mut clauses: Vec<String> = Vec::new();
    let mut binds = FilterBinds::default();
    let numeric: Option<f64> = filter.parse().ok();

    for (attr, attr_type) in spec.searchable {
        match attr_type {
            AttrType::Number => {
                if let Some(n) = numeric {
                    clauses.push(format!("{attr} = $filter_number"));
                    binds.number = Some(n);
                }
            }
            AttrType::Text => {
                clauses.push(format!(
                    "string::contains(string::lowercase({attr} ?? ''), $filter_text)"
                ));
                binds.text = Some(filter.to_lowercase());
            }
        }
    }

    if clauses.is_empty() {
        return ("false".to_string(), binds);
    }
    (format!("({})", clauses.join(" OR ")), binds)
}

/// Build the ORDER BY clause from a `field:direction,...` string.
///
/// Unknown fields and unknown direction tokens are rejected with a
/// validation error rather than passed through to the store.
fn build_order_clause(sort_by: &str, spec: &EntitySpec) -> Result<String, RepoError> {
    let mut parts: Vec<String> = Vec::new();

    for option in sort_by.split(',') {
        let option = option.trim();
        if option.is_empty() {
            continue;
        }
        let (field, direction) = match option.split_once(':') {
            Some((f, d)) => (f.trim(), d.trim()),
            None => (option, "1"),
        };

        if !spec.sortable.contains(&field) {
            return Err(RepoError::Validation(format!(
                "Cannot sort by unknown attribute '{field}'"
            )));
        }

        let keyword = match direction {
            "1" | "asc" | "ascending" => "ASC",
            "-1" | "desc" | "descending" => "DESC",
            other => {
                return Err(RepoError::Validation(format!(
                    "Unknown sort direction '{other}'"
                )));
            }
        };

        parts.push(format!("{field} {keyword}"));
    }

    if parts.is_empty() {
        return Err(RepoError::Validation("Empty sortBy parameter".to_string()));
    }
    Ok(parts.join(", "))
}

/// Parse a `children=` comma list into trimmed, non-empty names.
pub fn parse_children(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
