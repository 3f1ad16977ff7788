//! Financial consolidation for one period:
//! `final_pay = base_pay + Σ extras − Σ deductions` per employee, plus
//! grand totals. Values arrive already rounded (see `money`); sums are not
//! re-rounded to avoid double-rounding drift.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::models::base_pay::BasePayRecord;
use crate::domain::models::concept::Concept;
use crate::domain::models::employee::Employee;
use crate::domain::models::movement::Movement;

#[derive(Debug, Serialize, Clone)]
pub struct RollupRow {
    pub employee_id: String,
    pub employee_name: String,
    pub base_pay: f64,
    pub extras: f64,
    pub deductions: f64,
    pub final_pay: f64,
    pub movement_count: usize,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct RollupTotals {
    pub base_pay: f64,
    pub extras: f64,
    pub deductions: f64,
    pub final_pay: f64,
    pub employees: usize,
}

/// Post-aggregation filters. Rows are computed first, filtered after, so the
/// per-row figures are identical with or without a filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollupFilter {
    /// Keep only employees that have at least one extra movement.
    pub extras_only: bool,
    /// Keep only employees with no base-pay record (base_pay = 0).
    pub zero_base_only: bool,
}

pub fn compute_rollup(
    employees: &[Employee],
    base_pay: &[BasePayRecord],
    movements: &[Movement],
    concepts: &[Concept],
) -> Vec<RollupRow> {
    // BTreeMap keeps the output ordering stable across runs.
    let mut rows: BTreeMap<String, RollupRow> = BTreeMap::new();

    let name_of = |employee_id: &str| -> String {
        employees
            .iter()
            .find(|e| e.id == employee_id)
            .map(|e| e.full_name())
            .unwrap_or_default()
    };

    for record in base_pay {
        let row = rows
            .entry(record.employee_id.clone())
            .or_insert_with(|| RollupRow {
                employee_id: record.employee_id.clone(),
                employee_name: name_of(&record.employee_id),
                base_pay: 0.0,
                extras: 0.0,
                deductions: 0.0,
                final_pay: 0.0,
                movement_count: 0,
            });
        row.base_pay += record.amount;
    }

    for movement in movements {
        // A movement without a resolvable concept cannot be classified as
        // extra or deduction; it never silently adds to pay.
        let Some(concept) = concepts.iter().find(|c| c.id == movement.concept_id) else {
            continue;
        };

        // Employees present only via movements still get a row, base 0.
        let row = rows
            .entry(movement.employee_id.clone())
            .or_insert_with(|| RollupRow {
                employee_id: movement.employee_id.clone(),
                employee_name: name_of(&movement.employee_id),
                base_pay: 0.0,
                extras: 0.0,
                deductions: 0.0,
                final_pay: 0.0,
                movement_count: 0,
            });

        if concept.is_deduction() {
            row.deductions += movement.total_value;
        } else {
            row.extras += movement.total_value;
        }
        row.movement_count += 1;
    }

    let mut out: Vec<RollupRow> = rows.into_values().collect();
    for row in &mut out {
        row.final_pay = row.base_pay + row.extras - row.deductions;
    }
    out
}

pub fn apply_filter(rows: Vec<RollupRow>, filter: RollupFilter) -> Vec<RollupRow> {
    rows.into_iter()
        .filter(|row| !filter.extras_only || row.extras > 0.0)
        .filter(|row| !filter.zero_base_only || row.base_pay == 0.0)
        .collect()
}

pub fn compute_totals(rows: &[RollupRow]) -> RollupTotals {
    let mut totals = RollupTotals::default();
    for row in rows {
        totals.base_pay += row.base_pay;
        totals.extras += row.extras;
        totals.deductions += row.deductions;
        totals.final_pay += row.final_pay;
    }
    totals.employees = rows.len();
    totals
}
