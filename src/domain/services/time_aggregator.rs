//! Reduces raw clock entries into per-employee daily buckets and period
//! totals. Open entries (no clock-out) count toward the `open` status tally
//! but contribute zero paid minutes; that is policy, not an oversight.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::models::time_entry::{TimeEntry, ENTRY_APPROVED, ENTRY_PENDING, ENTRY_REJECTED};

/// Bulk approve/reject operations run in fixed-size chunks to bound any
/// single statement's blast radius.
pub const BULK_BATCH_SIZE: usize = 50;

#[derive(Debug, Serialize, Clone)]
pub struct DayBucket {
    /// Calendar date of `clock_in` (never `clock_out`).
    pub date: NaiveDate,
    pub net_minutes: i64,
    pub break_minutes: i64,
    pub entry_count: usize,
}

#[derive(Debug, Serialize, Clone)]
pub struct EmployeeTimeSummary {
    pub employee_id: String,
    pub total_minutes: i64,
    pub total_break_minutes: i64,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub open: usize,
    /// True if any entry is rejected or still open.
    pub has_issues: bool,
    pub days: Vec<DayBucket>,
}

pub fn aggregate(entries: &[TimeEntry]) -> Vec<EmployeeTimeSummary> {
    let mut by_employee: BTreeMap<String, Vec<&TimeEntry>> = BTreeMap::new();
    for entry in entries {
        by_employee.entry(entry.employee_id.clone()).or_default().push(entry);
    }

    by_employee
        .into_iter()
        .map(|(employee_id, entries)| summarize_employee(employee_id, &entries))
        .collect()
}

fn summarize_employee(employee_id: String, entries: &[&TimeEntry]) -> EmployeeTimeSummary {
    let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    let mut summary = EmployeeTimeSummary {
        employee_id,
        total_minutes: 0,
        total_break_minutes: 0,
        pending: 0,
        approved: 0,
        rejected: 0,
        open: 0,
        has_issues: false,
        days: Vec::new(),
    };

    for entry in entries {
        let net = entry.net_minutes();
        let date = entry.clock_in.date_naive();
        let bucket = days.entry(date).or_insert_with(|| DayBucket {
            date,
            net_minutes: 0,
            break_minutes: 0,
            entry_count: 0,
        });
        bucket.net_minutes += net;
        bucket.entry_count += 1;
        summary.total_minutes += net;

        if !entry.is_open() {
            bucket.break_minutes += entry.break_minutes as i64;
            summary.total_break_minutes += entry.break_minutes as i64;
        }

        if entry.is_open() {
            summary.open += 1;
        } else {
            match entry.status.as_str() {
                ENTRY_PENDING => summary.pending += 1,
                ENTRY_APPROVED => summary.approved += 1,
                ENTRY_REJECTED => summary.rejected += 1,
                _ => {}
            }
        }
    }

    summary.has_issues = summary.rejected > 0 || summary.open > 0;
    summary.days = days.into_values().collect();
    summary
}
