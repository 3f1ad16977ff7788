//! Spreadsheet column resolution: canonical field -> accepted header
//! aliases, matched against the actual header row after normalization.
//! Nothing here assumes column positions.

use std::collections::HashMap;

use crate::error::AppError;
use crate::domain::services::normalize::normalize_header;

pub struct ColumnSpec {
    pub field: &'static str,
    pub aliases: &'static [&'static str],
    pub required: bool,
}

/// Headers accepted for employee imports. Alias lists carry the spellings
/// seen in the wild, including Spanish exports from the upstream HR system.
pub const EMPLOYEE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        field: "first_name",
        aliases: &["first name", "firstname", "first", "nombre", "nombres"],
        required: false,
    },
    ColumnSpec {
        field: "last_name",
        aliases: &["last name", "lastname", "last", "surname", "apellido", "apellidos"],
        required: false,
    },
    ColumnSpec {
        field: "phone_number",
        aliases: &["phone", "phone number", "telephone", "mobile", "cell", "telefono"],
        required: false,
    },
    ColumnSpec {
        field: "external_id",
        aliases: &["external id", "employee id", "staff id", "hr id", "id empleado"],
        required: false,
    },
    ColumnSpec {
        field: "manager_name",
        aliases: &["manager", "manager name", "supervisor", "encargado"],
        required: false,
    },
    ColumnSpec {
        field: "recommender_name",
        aliases: &["recommender", "recommended by", "referral", "recomendado por"],
        required: false,
    },
];

/// Headers accepted for pay-adjustment (movement) imports.
pub const MOVEMENT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        field: "employee",
        aliases: &["employee", "employee name", "name", "empleado", "nombre"],
        required: true,
    },
    ColumnSpec {
        field: "external_id",
        aliases: &["external id", "employee id", "staff id", "id empleado"],
        required: false,
    },
    ColumnSpec {
        field: "concept",
        aliases: &["concept", "concept name", "adjustment", "concepto"],
        required: true,
    },
    ColumnSpec {
        field: "quantity",
        aliases: &["quantity", "qty", "units", "hours", "cantidad"],
        required: false,
    },
    ColumnSpec {
        field: "rate",
        aliases: &["rate", "unit rate", "price", "tarifa"],
        required: false,
    },
    ColumnSpec {
        field: "total_value",
        aliases: &["total", "total value", "value", "amount", "importe", "monto"],
        required: false,
    },
];

/// Resolve canonical fields to header indices. Missing required columns are
/// a validation error naming the field.
pub fn resolve_columns(
    headers: &[String],
    specs: &[ColumnSpec],
) -> Result<HashMap<&'static str, usize>, AppError> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    let mut resolved = HashMap::new();

    for spec in specs {
        let found = spec.aliases.iter().find_map(|alias| {
            let alias_norm = normalize_header(alias);
            normalized.iter().position(|h| *h == alias_norm)
        });
        match found {
            Some(idx) => {
                resolved.insert(spec.field, idx);
            }
            None if spec.required => {
                return Err(AppError::Validation(format!(
                    "Missing required column '{}'",
                    spec.field
                )));
            }
            None => {}
        }
    }
    Ok(resolved)
}

/// Fetch a trimmed, non-empty cell for a resolved field.
pub fn cell_value(
    row: &[String],
    resolved: &HashMap<&'static str, usize>,
    field: &str,
) -> Option<String> {
    let idx = *resolved.get(field)?;
    let value = row.get(idx)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolution_is_case_and_punctuation_insensitive() {
        let h = headers(&["FIRST-NAME", " Last Name ", "Teléfono"]);
        let resolved = resolve_columns(&h, EMPLOYEE_COLUMNS).unwrap();
        assert_eq!(resolved["first_name"], 0);
        assert_eq!(resolved["last_name"], 1);
        assert_eq!(resolved["phone_number"], 2);
    }

    #[test]
    fn test_missing_required_column_is_rejected() {
        let h = headers(&["Employee", "Quantity"]);
        let err = resolve_columns(&h, MOVEMENT_COLUMNS).unwrap_err();
        assert!(err.to_string().contains("concept"));
    }

    #[test]
    fn test_cell_value_trims_and_drops_empty() {
        let h = headers(&["First Name", "Last Name"]);
        let resolved = resolve_columns(&h, EMPLOYEE_COLUMNS).unwrap();
        let row = vec![" Ana ".to_string(), "".to_string()];
        assert_eq!(cell_value(&row, &resolved, "first_name").as_deref(), Some("Ana"));
        assert_eq!(cell_value(&row, &resolved, "last_name"), None);
        assert_eq!(cell_value(&row, &resolved, "external_id"), None);
    }
}
