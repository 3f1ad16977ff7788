use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const CATEGORY_EXTRA: &str = "EXTRA";
pub const CATEGORY_DEDUCTION: &str = "DEDUCTION";
pub const CALC_QUANTITY_X_RATE: &str = "QUANTITY_X_RATE";
pub const CALC_MANUAL_VALUE: &str = "MANUAL_VALUE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConceptCategory {
    Extra,
    Deduction,
}

impl ConceptCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConceptCategory::Extra => CATEGORY_EXTRA,
            ConceptCategory::Deduction => CATEGORY_DEDUCTION,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            CATEGORY_EXTRA => Some(ConceptCategory::Extra),
            CATEGORY_DEDUCTION => Some(ConceptCategory::Deduction),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcMode {
    QuantityXRate,
    ManualValue,
}

impl CalcMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalcMode::QuantityXRate => CALC_QUANTITY_X_RATE,
            CalcMode::ManualValue => CALC_MANUAL_VALUE,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            CALC_QUANTITY_X_RATE => Some(CalcMode::QuantityXRate),
            CALC_MANUAL_VALUE => Some(CalcMode::ManualValue),
            _ => None,
        }
    }
}

/// A named pay-adjustment type ("Overtime", "Uniform deduction", ...).
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Concept {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub category: String,
    pub calc_mode: String,
    pub default_rate: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Concept {
    pub fn new(
        tenant_id: String,
        name: String,
        category: ConceptCategory,
        calc_mode: CalcMode,
        default_rate: Option<f64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            name,
            category: category.as_str().to_string(),
            calc_mode: calc_mode.as_str().to_string(),
            default_rate,
            created_at: Utc::now(),
        }
    }

    pub fn is_deduction(&self) -> bool {
        self.category == CATEGORY_DEDUCTION
    }
}
