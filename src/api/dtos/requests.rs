use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::services::change_set::DiffPolicy;
use crate::domain::services::reconciliation::{EmployeeRowPreview, MovementRowPreview};

#[derive(Deserialize)]
pub struct CreateTenantRequest {
    pub name: String,
    pub slug: String,
}

#[derive(Deserialize)]
pub struct CreateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub external_id: Option<String>,
    pub manager_name: Option<String>,
    pub recommender_name: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateEmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub external_id: Option<String>,
    pub manager_name: Option<String>,
    pub recommender_name: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePeriodRequest {
    pub start_date: NaiveDate,
}

#[derive(Deserialize)]
pub struct CreateConceptRequest {
    pub name: String,
    pub category: String,
    pub calc_mode: String,
    pub default_rate: Option<f64>,
}

#[derive(Deserialize)]
pub struct UpdateConceptRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub calc_mode: Option<String>,
    pub default_rate: Option<f64>,
}

#[derive(Deserialize)]
pub struct CreateMovementRequest {
    pub employee_id: String,
    pub concept_id: String,
    pub quantity: Option<f64>,
    pub rate: Option<f64>,
    pub total_value: Option<f64>,
}

#[derive(Deserialize)]
pub struct UpdateMovementRequest {
    pub concept_id: Option<String>,
    pub quantity: Option<f64>,
    pub rate: Option<f64>,
    pub total_value: Option<f64>,
}

#[derive(Deserialize)]
pub struct CreateTimeEntryRequest {
    pub employee_id: String,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub break_minutes: Option<i32>,
}

#[derive(Deserialize)]
pub struct UpdateTimeEntryRequest {
    pub clock_in: Option<DateTime<Utc>>,
    pub clock_out: Option<DateTime<Utc>>,
    pub break_minutes: Option<i32>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct BulkEntryStatusRequest {
    pub ids: Vec<String>,
    pub status: String,
}

#[derive(Deserialize)]
pub struct SetBasePayRequest {
    pub employee_id: String,
    pub amount: f64,
}

#[derive(Deserialize)]
pub struct EmployeeImportQuery {
    #[serde(default = "default_policy")]
    pub policy: DiffPolicy,
}

fn default_policy() -> DiffPolicy {
    DiffPolicy::DiffOnly
}

#[derive(Deserialize)]
pub struct ApplyEmployeeImportRequest {
    pub rows: Vec<EmployeeRowPreview>,
}

#[derive(Deserialize)]
pub struct ApplyMovementImportRequest {
    pub period_id: String,
    pub rows: Vec<MovementRowPreview>,
}

#[derive(Deserialize, Default)]
pub struct RollupQuery {
    #[serde(default)]
    pub extras_only: bool,
    #[serde(default)]
    pub zero_base_only: bool,
}
