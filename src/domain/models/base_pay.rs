use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Pre-computed regular-hours pay for one (employee, period), produced by an
/// external hours-to-pay pipeline. Authoritative input to the rollup.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct BasePayRecord {
    pub id: String,
    pub tenant_id: String,
    pub period_id: String,
    pub employee_id: String,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

impl BasePayRecord {
    pub fn new(tenant_id: String, period_id: String, employee_id: String, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            period_id,
            employee_id,
            amount,
            created_at: Utc::now(),
        }
    }
}
