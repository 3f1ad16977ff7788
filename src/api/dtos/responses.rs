use serde::Serialize;

use crate::domain::services::rollup::{RollupRow, RollupTotals};
use crate::domain::services::time_aggregator::EmployeeTimeSummary;

#[derive(Serialize)]
pub struct PayrollReportResponse {
    pub period_id: String,
    pub rows: Vec<RollupRow>,
    pub totals: RollupTotals,
}

/// Tabular export: a header row plus primitive-valued cells, ready for a
/// spreadsheet writer on the client side.
#[derive(Serialize)]
pub struct ExportResponse {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

#[derive(Serialize)]
pub struct TimeReportResponse {
    pub period_id: String,
    pub summaries: Vec<EmployeeTimeSummary>,
}

#[derive(Serialize)]
pub struct BulkEntryStatusResponse {
    pub requested: usize,
    pub updated: u64,
}

#[derive(Serialize, Default)]
pub struct ImportSummaryResponse {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}
