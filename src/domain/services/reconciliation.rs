//! Bulk-import orchestration, pure half: turn a parsed table into a
//! reviewable list of proposed changes. The review list travels to the
//! client and back by value; the apply half lives in the import handler
//! because it touches repositories.

use serde::{Deserialize, Serialize};

use crate::domain::models::concept::{CalcMode, Concept};
use crate::domain::models::employee::Employee;
use crate::domain::services::change_set::{build_change_set, ChangeSet, DiffPolicy, EmployeeFields};
use crate::domain::services::columns::{
    cell_value, resolve_columns, EMPLOYEE_COLUMNS, MOVEMENT_COLUMNS,
};
use crate::domain::services::identity_matcher::{match_employee, ExternalIdentity};
use crate::domain::services::money;
use crate::domain::services::normalize::normalize_name;
use crate::error::AppError;

/// Output of the external tabular reader: header row plus data rows of
/// string cells.
#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRowPreview {
    /// 1-based data row number (header excluded), for human review.
    pub row_number: usize,
    pub matched_employee_id: Option<String>,
    pub matched_employee_name: Option<String>,
    pub change_set: ChangeSet,
    /// Reviewer toggle; defaults to true for rows with proposed changes.
    pub include: bool,
    pub error: Option<String>,
}

pub fn preview_employee_rows(
    table: &ParsedTable,
    policy: DiffPolicy,
    candidates: &[Employee],
) -> Result<Vec<EmployeeRowPreview>, AppError> {
    let resolved = resolve_columns(&table.headers, EMPLOYEE_COLUMNS)?;

    let mut previews = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        let row_number = i + 1;

        let fields = EmployeeFields {
            first_name: cell_value(row, &resolved, "first_name"),
            last_name: cell_value(row, &resolved, "last_name"),
            phone_number: cell_value(row, &resolved, "phone_number"),
            external_id: cell_value(row, &resolved, "external_id"),
            manager_name: cell_value(row, &resolved, "manager_name"),
            recommender_name: cell_value(row, &resolved, "recommender_name"),
        };

        let identity = ExternalIdentity {
            external_id: fields.external_id.clone(),
            phone_number: fields.phone_number.clone(),
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
        };

        if identity.is_empty() {
            previews.push(EmployeeRowPreview {
                row_number,
                matched_employee_id: None,
                matched_employee_name: None,
                change_set: ChangeSet { employee_id: None, changes: vec![] },
                include: false,
                error: Some("Row has no identifying fields".to_string()),
            });
            continue;
        }

        let matched = match_employee(&identity, candidates);
        let change_set = build_change_set(policy, &fields, matched);

        // Creates need at least a usable name.
        let error = if matched.is_none()
            && (fields.first_name.is_none() || fields.last_name.is_none())
        {
            Some("New employee row is missing a first or last name".to_string())
        } else {
            None
        };

        let include = error.is_none() && !change_set.is_empty();
        previews.push(EmployeeRowPreview {
            row_number,
            matched_employee_id: matched.map(|e| e.id.clone()),
            matched_employee_name: matched.map(|e| e.full_name()),
            change_set,
            include,
            error,
        });
    }
    Ok(previews)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementRowPreview {
    pub row_number: usize,
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    pub concept_id: Option<String>,
    pub concept_name: Option<String>,
    pub quantity: Option<f64>,
    pub rate: Option<f64>,
    pub total_value: Option<f64>,
    pub include: bool,
    pub error: Option<String>,
}

pub fn preview_movement_rows(
    table: &ParsedTable,
    candidates: &[Employee],
    concepts: &[Concept],
) -> Result<Vec<MovementRowPreview>, AppError> {
    let resolved = resolve_columns(&table.headers, MOVEMENT_COLUMNS)?;

    let mut previews = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        previews.push(preview_movement_row(i + 1, row, &resolved, candidates, concepts));
    }
    Ok(previews)
}

fn preview_movement_row(
    row_number: usize,
    row: &[String],
    resolved: &std::collections::HashMap<&'static str, usize>,
    candidates: &[Employee],
    concepts: &[Concept],
) -> MovementRowPreview {
    let mut preview = MovementRowPreview {
        row_number,
        employee_id: None,
        employee_name: None,
        concept_id: None,
        concept_name: None,
        quantity: None,
        rate: None,
        total_value: None,
        include: false,
        error: None,
    };

    let employee_cell = cell_value(row, resolved, "employee");
    let identity = ExternalIdentity {
        external_id: cell_value(row, resolved, "external_id"),
        phone_number: None,
        first_name: employee_cell.clone(),
        last_name: None,
    };
    // The employee column usually holds the full name; try both orders via
    // the full-name cell split.
    let identity = match employee_cell.as_deref().map(split_full_name) {
        Some(Some((first, last))) => ExternalIdentity {
            first_name: Some(first),
            last_name: Some(last),
            ..identity
        },
        _ => identity,
    };

    let Some(employee) = match_employee(&identity, candidates) else {
        preview.error = Some("No matching employee".to_string());
        return preview;
    };
    preview.employee_id = Some(employee.id.clone());
    preview.employee_name = Some(employee.full_name());

    let Some(concept_cell) = cell_value(row, resolved, "concept") else {
        preview.error = Some("Missing concept".to_string());
        return preview;
    };
    let wanted = normalize_name(&concept_cell);
    let Some(concept) = concepts.iter().find(|c| normalize_name(&c.name) == wanted) else {
        preview.error = Some(format!("Unknown concept '{}'", concept_cell));
        return preview;
    };
    preview.concept_id = Some(concept.id.clone());
    preview.concept_name = Some(concept.name.clone());

    let quantity = parse_cell_number(row, resolved, "quantity");
    let rate = parse_cell_number(row, resolved, "rate");
    let direct_value = parse_cell_number(row, resolved, "total_value");

    let total = match concept.calc_mode.as_str() {
        m if m == CalcMode::QuantityXRate.as_str() => {
            let Some(q) = quantity else {
                preview.error = Some("Missing quantity".to_string());
                return preview;
            };
            let Some(r) = rate.or(concept.default_rate) else {
                preview.error = Some("Missing rate and concept has no default".to_string());
                return preview;
            };
            preview.quantity = Some(q);
            preview.rate = Some(r);
            match money::quantity_times_rate(q, r) {
                Ok(total) => total,
                Err(e) => {
                    preview.error = Some(e.to_string());
                    return preview;
                }
            }
        }
        _ => {
            let Some(v) = direct_value else {
                preview.error = Some("Missing total value".to_string());
                return preview;
            };
            match money::round_money(v) {
                Ok(total) => total,
                Err(e) => {
                    preview.error = Some(e.to_string());
                    return preview;
                }
            }
        }
    };

    if total == 0.0 {
        preview.error = Some("Movement computes to zero".to_string());
        return preview;
    }

    preview.total_value = Some(total);
    preview.include = true;
    preview
}

fn parse_cell_number(
    row: &[String],
    resolved: &std::collections::HashMap<&'static str, usize>,
    field: &str,
) -> Option<f64> {
    cell_value(row, resolved, field).and_then(|v| v.replace(',', ".").parse::<f64>().ok())
}

fn split_full_name(full: &str) -> Option<(String, String)> {
    let mut parts = full.split_whitespace();
    let first = parts.next()?.to_string();
    let rest: Vec<&str> = parts.collect();
    if rest.is_empty() {
        return None;
    }
    Some((first, rest.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::concept::ConceptCategory;
    use crate::domain::models::employee::NewEmployeeParams;

    fn employee(first: &str, last: &str) -> Employee {
        Employee::new(NewEmployeeParams {
            tenant_id: "t1".to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone_number: None,
            external_id: None,
            manager_name: None,
            recommender_name: None,
        })
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> ParsedTable {
        ParsedTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_employee_preview_matches_and_diffs() {
        let ana = employee("Ana", "Ruiz");
        let t = table(
            &["First Name", "Last Name", "Phone"],
            &[&["ANA", "RUIZ", "555-000-1111"], &["Carlos", "Vega", ""]],
        );
        let previews = preview_employee_rows(&t, DiffPolicy::DiffOnly, &[ana.clone()]).unwrap();
        assert_eq!(previews.len(), 2);

        let first = &previews[0];
        assert_eq!(first.matched_employee_id.as_deref(), Some(ana.id.as_str()));
        assert_eq!(first.change_set.changes.len(), 1); // only the phone differs
        assert!(first.include);

        let second = &previews[1];
        assert!(second.matched_employee_id.is_none());
        assert!(second.change_set.is_create());
        assert!(second.include);
    }

    #[test]
    fn test_employee_preview_rerun_is_stable() {
        let ana = employee("Ana", "Ruiz");
        let t = table(&["First Name", "Last Name"], &[&["Ana", "Ruiz"]]);
        let a = preview_employee_rows(&t, DiffPolicy::DiffOnly, std::slice::from_ref(&ana)).unwrap();
        let b = preview_employee_rows(&t, DiffPolicy::DiffOnly, std::slice::from_ref(&ana)).unwrap();
        assert_eq!(a[0].change_set.changes, b[0].change_set.changes);
        assert!(a[0].change_set.is_empty());
        assert!(!a[0].include);
    }

    #[test]
    fn test_movement_preview_quantity_times_rate() {
        let ana = employee("Ana", "Ruiz");
        let overtime = Concept::new(
            "t1".to_string(),
            "Overtime".to_string(),
            ConceptCategory::Extra,
            CalcMode::QuantityXRate,
            None,
        );
        let t = table(
            &["Employee", "Concept", "Quantity", "Rate"],
            &[&["Ana Ruiz", "overtime", "5", "12.50"]],
        );
        let previews = preview_movement_rows(&t, &[ana], &[overtime]).unwrap();
        assert_eq!(previews[0].total_value, Some(62.50));
        assert!(previews[0].include);
    }

    #[test]
    fn test_movement_preview_rejects_zero_and_unknowns() {
        let ana = employee("Ana", "Ruiz");
        let bonus = Concept::new(
            "t1".to_string(),
            "Bonus".to_string(),
            ConceptCategory::Extra,
            CalcMode::ManualValue,
            None,
        );
        let t = table(
            &["Employee", "Concept", "Total"],
            &[
                &["Ana Ruiz", "Bonus", "0"],
                &["Nadie Aqui", "Bonus", "10"],
                &["Ana Ruiz", "Mystery", "10"],
            ],
        );
        let previews = preview_movement_rows(&t, &[ana], &[bonus]).unwrap();
        assert!(previews[0].error.as_deref().unwrap().contains("zero"));
        assert_eq!(previews[1].error.as_deref(), Some("No matching employee"));
        assert!(previews[2].error.as_deref().unwrap().contains("Mystery"));
        assert!(previews.iter().all(|p| !p.include));
    }
}
