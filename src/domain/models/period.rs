use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::FromRow;

pub const STATUS_OPEN: &str = "OPEN";
pub const STATUS_CLOSED: &str = "CLOSED";
pub const STATUS_PUBLISHED: &str = "PUBLISHED";
pub const STATUS_PAID: &str = "PAID";

/// Lifecycle status of a weekly pay period. Stored as upper-case TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodStatus {
    Open,
    Closed,
    Published,
    Paid,
}

impl PeriodStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodStatus::Open => STATUS_OPEN,
            PeriodStatus::Closed => STATUS_CLOSED,
            PeriodStatus::Published => STATUS_PUBLISHED,
            PeriodStatus::Paid => STATUS_PAID,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            STATUS_OPEN => Some(PeriodStatus::Open),
            STATUS_CLOSED => Some(PeriodStatus::Closed),
            STATUS_PUBLISHED => Some(PeriodStatus::Published),
            STATUS_PAID => Some(PeriodStatus::Paid),
            _ => None,
        }
    }
}

/// A fixed 7-day payroll cycle. `start_date`/`end_date` are immutable after
/// creation; only `status` and its timestamps move.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PayPeriod {
    pub id: String,
    pub tenant_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub closed_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PayPeriod {
    /// New periods start CLOSED ("not yet opened"); the sequential-open rule
    /// governs when one becomes the tenant's in-flight period.
    pub fn new(tenant_id: String, start_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            start_date,
            end_date: start_date + Duration::days(6),
            status: STATUS_CLOSED.to_string(),
            closed_at: None,
            published_at: None,
            paid_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn status_enum(&self) -> Option<PeriodStatus> {
        PeriodStatus::parse(&self.status)
    }

    /// "Went through a real close": distinguishes a finished period from one
    /// that was created but never opened.
    pub fn has_been_closed(&self) -> bool {
        self.status != STATUS_OPEN && self.closed_at.is_some()
    }
}
