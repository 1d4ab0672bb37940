use serde::{Deserialize, Serialize};

use super::domain::ApplicantRecord;

/// Sort order for the list view. Descending flips the comparator's sign
/// only; tie order is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "ascending")]
    Asc,
    #[serde(alias = "descending")]
    Desc,
}

/// The "has field" dropdown: every record, or only records with a non-blank
/// value at one field id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFilter {
    All,
    Field(String),
}

impl FieldFilter {
    /// Parses the wire value, where the literal `all` means no filter.
    pub fn from_param(value: &str) -> Self {
        if value == "all" {
            FieldFilter::All
        } else {
            FieldFilter::Field(value.to_string())
        }
    }
}

/// The four list-view controls. Defaults mirror the list page's initial
/// state: no search, no filter, ascending by last name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub filter_field: FieldFilter,
    pub sort_field: String,
    pub direction: SortDirection,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter_field: FieldFilter::All,
            sort_field: "last_name".to_string(),
            direction: SortDirection::Asc,
        }
    }
}

/// Produces the displayed subset: search, then has-field filter, then a
/// stable case-insensitive sort. Pure; recomputed from scratch on every
/// call rather than incrementally maintained.
pub fn select(records: &[ApplicantRecord], query: &ListQuery) -> Vec<ApplicantRecord> {
    let term = query.search.to_lowercase();

    let mut result: Vec<ApplicantRecord> = records
        .iter()
        .filter(|record| {
            term.is_empty()
                || record
                    .fields
                    .values()
                    .any(|value| value.to_lowercase().contains(&term))
        })
        .filter(|record| match &query.filter_field {
            FieldFilter::All => true,
            FieldFilter::Field(id) => record
                .field(id)
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false),
        })
        .cloned()
        .collect();

    // Vec::sort_by is stable, so equal keys keep their post-filter order.
    result.sort_by(|a, b| {
        let left = sort_key(a, &query.sort_field);
        let right = sort_key(b, &query.sort_field);
        let ordering = left.cmp(&right);
        match query.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    result
}

fn sort_key(record: &ApplicantRecord, field: &str) -> String {
    record.field(field).unwrap_or_default().to_lowercase()
}
