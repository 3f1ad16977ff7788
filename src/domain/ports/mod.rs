use crate::domain::models::{
    audit::AuditEvent, base_pay::BasePayRecord, concept::Concept, employee::Employee,
    movement::Movement, period::PayPeriod, tenant::Tenant, time_entry::TimeEntry,
};
use crate::domain::services::reconciliation::ParsedTable;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn create(&self, tenant: &Tenant) -> Result<Tenant, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, AppError>;
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn create(&self, employee: &Employee) -> Result<Employee, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Employee>, AppError>;
    /// Active employees in creation order; the stable ordering keeps identity
    /// matching deterministic across runs.
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Employee>, AppError>;
    async fn update(&self, employee: &Employee) -> Result<Employee, AppError>;
    /// Employees referenced by financial records are never hard-deleted.
    async fn deactivate(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PayPeriodRepository: Send + Sync {
    async fn create(&self, period: &PayPeriod) -> Result<PayPeriod, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<PayPeriod>, AppError>;
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<PayPeriod>, AppError>;
    async fn count_overlapping(
        &self,
        tenant_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<i64, AppError>;
    /// Chronological predecessor by start_date.
    async fn find_predecessor(
        &self,
        tenant_id: &str,
        start: NaiveDate,
    ) -> Result<Option<PayPeriod>, AppError>;
    async fn find_open(&self, tenant_id: &str) -> Result<Option<PayPeriod>, AppError>;
    async fn find_covering(
        &self,
        tenant_id: &str,
        date: NaiveDate,
    ) -> Result<Option<PayPeriod>, AppError>;

    // Conditional transitions: each returns false when the optimistic guard
    // (current status, single-open rule) no longer holds at write time.
    async fn close(&self, tenant_id: &str, id: &str, at: DateTime<Utc>) -> Result<bool, AppError>;
    /// CLOSED -> OPEN, guarded in one statement against any other OPEN
    /// period of the tenant.
    async fn open(&self, tenant_id: &str, id: &str) -> Result<bool, AppError>;
    async fn publish(&self, tenant_id: &str, id: &str, at: DateTime<Utc>) -> Result<bool, AppError>;
    async fn unpublish(&self, tenant_id: &str, id: &str) -> Result<bool, AppError>;
    async fn mark_paid(&self, tenant_id: &str, id: &str, at: DateTime<Utc>) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ConceptRepository: Send + Sync {
    async fn create(&self, concept: &Concept) -> Result<Concept, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Concept>, AppError>;
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Concept>, AppError>;
    async fn update(&self, concept: &Concept) -> Result<Concept, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait MovementRepository: Send + Sync {
    /// Insert conditioned on the target period being OPEN at write time;
    /// returns false when the period is locked.
    async fn create(&self, movement: &Movement) -> Result<bool, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Movement>, AppError>;
    async fn list_by_period(&self, tenant_id: &str, period_id: &str) -> Result<Vec<Movement>, AppError>;
    /// Update/delete carry the same open-period condition as create.
    async fn update(&self, movement: &Movement) -> Result<bool, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait TimeEntryRepository: Send + Sync {
    /// Insert conditioned on `period_id` (the period covering clock_in,
    /// resolved by the caller) being OPEN at write time.
    async fn create(&self, entry: &TimeEntry, period_id: &str) -> Result<bool, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<TimeEntry>, AppError>;
    async fn list_by_range(
        &self,
        tenant_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimeEntry>, AppError>;
    async fn update(&self, entry: &TimeEntry, period_id: &str) -> Result<bool, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str, period_id: &str) -> Result<bool, AppError>;
    /// One transaction per chunk; only rows still PENDING transition, so a
    /// retried chunk is a no-op for already-moved rows. Returns rows moved.
    async fn bulk_update_status(
        &self,
        tenant_id: &str,
        ids: &[String],
        new_status: &str,
    ) -> Result<u64, AppError>;
}

#[async_trait]
pub trait BasePayRepository: Send + Sync {
    async fn upsert(&self, record: &BasePayRecord) -> Result<BasePayRecord, AppError>;
    async fn list_by_period(&self, tenant_id: &str, period_id: &str) -> Result<Vec<BasePayRecord>, AppError>;
}

#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn record(&self, event: &AuditEvent) -> Result<(), AppError>;
    async fn list_by_tenant(&self, tenant_id: &str, limit: i64) -> Result<Vec<AuditEvent>, AppError>;
}

/// External tabular reader: raw file bytes in, header + string rows out.
/// Column semantics are resolved by the domain, not here.
pub trait TabularReader: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<ParsedTable, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManageEmployees,
    ClosePeriod,
    OpenPeriod,
    /// Elevated: open a closed period out of the normal sequence.
    ReopenOutOfSequence,
    PublishPeriod,
    MarkPeriodPaid,
    ApproveTimeEntries,
    ApplyImport,
}

/// External capability check; role storage lives upstream.
pub trait Authorizer: Send + Sync {
    fn can(&self, role: &str, capability: Capability) -> bool;
}
