use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Employee {
    pub id: String,
    pub tenant_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub external_id: Option<String>,
    pub manager_name: Option<String>,
    pub recommender_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewEmployeeParams {
    pub tenant_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub external_id: Option<String>,
    pub manager_name: Option<String>,
    pub recommender_name: Option<String>,
}

impl Employee {
    pub fn new(params: NewEmployeeParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: params.tenant_id,
            first_name: params.first_name,
            last_name: params.last_name,
            phone_number: params.phone_number,
            external_id: params.external_id,
            manager_name: params.manager_name,
            recommender_name: params.recommender_name,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
