use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const ENTRY_PENDING: &str = "PENDING";
pub const ENTRY_APPROVED: &str = "APPROVED";
pub const ENTRY_REJECTED: &str = "REJECTED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeEntryStatus {
    Pending,
    Approved,
    Rejected,
}

impl TimeEntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeEntryStatus::Pending => ENTRY_PENDING,
            TimeEntryStatus::Approved => ENTRY_APPROVED,
            TimeEntryStatus::Rejected => ENTRY_REJECTED,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            ENTRY_PENDING => Some(TimeEntryStatus::Pending),
            ENTRY_APPROVED => Some(TimeEntryStatus::Approved),
            ENTRY_REJECTED => Some(TimeEntryStatus::Rejected),
            _ => None,
        }
    }
}

/// A raw clock-in/clock-out record. Duration is derived, never stored.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TimeEntry {
    pub id: String,
    pub tenant_id: String,
    pub employee_id: String,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub break_minutes: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TimeEntry {
    pub fn new(
        tenant_id: String,
        employee_id: String,
        clock_in: DateTime<Utc>,
        clock_out: Option<DateTime<Utc>>,
        break_minutes: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            employee_id,
            clock_in,
            clock_out,
            break_minutes,
            status: ENTRY_PENDING.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Still running: no clock-out yet.
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Net worked minutes. An open entry contributes zero; it is counted
    /// separately, not paid.
    pub fn net_minutes(&self) -> i64 {
        match self.clock_out {
            Some(out) => ((out - self.clock_in).num_minutes() - self.break_minutes as i64).max(0),
            None => 0,
        }
    }
}
