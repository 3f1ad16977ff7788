//! Computes field-level change-sets between an external row and the matched
//! employee (or a create set for unmatched rows). Each change carries field
//! identity plus old and new values so a human can review before commit.

use serde::{Deserialize, Serialize};

use crate::domain::models::employee::Employee;
use crate::domain::services::normalize::{normalize_name, normalize_phone, title_case};

pub const FIELD_FIRST_NAME: &str = "first_name";
pub const FIELD_LAST_NAME: &str = "last_name";
pub const FIELD_PHONE_NUMBER: &str = "phone_number";
pub const FIELD_EXTERNAL_ID: &str = "external_id";
pub const FIELD_MANAGER_NAME: &str = "manager_name";
pub const FIELD_RECOMMENDER_NAME: &str = "recommender_name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffPolicy {
    /// Propose only fields whose normalized value differs.
    DiffOnly,
    /// Propose every non-empty external field, differing or not.
    FullReplace,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Update target, or `None` for a create.
    pub employee_id: Option<String>,
    pub changes: Vec<FieldChange>,
}

impl ChangeSet {
    pub fn is_create(&self) -> bool {
        self.employee_id.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn value_of(&self, field: &str) -> Option<&str> {
        self.changes
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.new_value.as_str())
    }
}

/// External row reduced to the canonical employee fields.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub external_id: Option<String>,
    pub manager_name: Option<String>,
    pub recommender_name: Option<String>,
}

fn is_name_field(field: &str) -> bool {
    matches!(
        field,
        FIELD_FIRST_NAME | FIELD_LAST_NAME | FIELD_MANAGER_NAME | FIELD_RECOMMENDER_NAME
    )
}

/// Normalized comparison: names fold case/accents/whitespace, phones compare
/// digits only, everything else compares trimmed.
fn same_value(field: &str, old: &str, new: &str) -> bool {
    if is_name_field(field) {
        normalize_name(old) == normalize_name(new)
    } else if field == FIELD_PHONE_NUMBER {
        normalize_phone(old) == normalize_phone(new)
    } else {
        old.trim() == new.trim()
    }
}

/// Name-like fields are written in title case regardless of diff policy.
fn write_value(field: &str, raw: &str) -> String {
    if is_name_field(field) {
        title_case(raw.trim())
    } else {
        raw.trim().to_string()
    }
}

pub fn build_change_set(
    policy: DiffPolicy,
    fields: &EmployeeFields,
    existing: Option<&Employee>,
) -> ChangeSet {
    let pairs: [(&str, Option<&String>, Option<&str>); 6] = [
        (
            FIELD_FIRST_NAME,
            fields.first_name.as_ref(),
            existing.map(|e| e.first_name.as_str()),
        ),
        (
            FIELD_LAST_NAME,
            fields.last_name.as_ref(),
            existing.map(|e| e.last_name.as_str()),
        ),
        (
            FIELD_PHONE_NUMBER,
            fields.phone_number.as_ref(),
            existing.and_then(|e| e.phone_number.as_deref()),
        ),
        (
            FIELD_EXTERNAL_ID,
            fields.external_id.as_ref(),
            existing.and_then(|e| e.external_id.as_deref()),
        ),
        (
            FIELD_MANAGER_NAME,
            fields.manager_name.as_ref(),
            existing.and_then(|e| e.manager_name.as_deref()),
        ),
        (
            FIELD_RECOMMENDER_NAME,
            fields.recommender_name.as_ref(),
            existing.and_then(|e| e.recommender_name.as_deref()),
        ),
    ];

    let mut changes = Vec::new();
    for (field, external, current) in pairs {
        let Some(raw) = external else { continue };
        if raw.trim().is_empty() {
            continue;
        }

        let include = match (policy, existing) {
            // Unmatched rows become full create sets under either policy.
            (_, None) => true,
            (DiffPolicy::FullReplace, Some(_)) => true,
            (DiffPolicy::DiffOnly, Some(_)) => {
                !current.is_some_and(|old| same_value(field, old, raw))
            }
        };

        if include {
            changes.push(FieldChange {
                field: field.to_string(),
                old_value: current.map(str::to_string),
                new_value: write_value(field, raw),
            });
        }
    }

    ChangeSet {
        employee_id: existing.map(|e| e.id.clone()),
        changes,
    }
}

/// Apply a reviewed change-set onto an employee record in memory; the caller
/// persists the result.
pub fn apply_changes(employee: &mut Employee, changes: &[FieldChange]) {
    for change in changes {
        let value = change.new_value.clone();
        match change.field.as_str() {
            FIELD_FIRST_NAME => employee.first_name = value,
            FIELD_LAST_NAME => employee.last_name = value,
            FIELD_PHONE_NUMBER => employee.phone_number = Some(value),
            FIELD_EXTERNAL_ID => employee.external_id = Some(value),
            FIELD_MANAGER_NAME => employee.manager_name = Some(value),
            FIELD_RECOMMENDER_NAME => employee.recommender_name = Some(value),
            _ => {}
        }
    }
}
