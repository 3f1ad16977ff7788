use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One pay adjustment instance for an (employee, period, concept) triple.
/// `total_value` is always non-zero; zero-value computations are rejected
/// before a movement is ever constructed.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Movement {
    pub id: String,
    pub tenant_id: String,
    pub period_id: String,
    pub employee_id: String,
    pub concept_id: String,
    pub quantity: Option<f64>,
    pub rate: Option<f64>,
    pub total_value: f64,
    pub created_at: DateTime<Utc>,
}

pub struct NewMovementParams {
    pub tenant_id: String,
    pub period_id: String,
    pub employee_id: String,
    pub concept_id: String,
    pub quantity: Option<f64>,
    pub rate: Option<f64>,
    pub total_value: f64,
}

impl Movement {
    pub fn new(params: NewMovementParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: params.tenant_id,
            period_id: params.period_id,
            employee_id: params.employee_id,
            concept_id: params.concept_id,
            quantity: params.quantity,
            rate: params.rate,
            total_value: params.total_value,
            created_at: Utc::now(),
        }
    }
}
