pub mod postgres_audit_repo;
pub mod postgres_base_pay_repo;
pub mod postgres_concept_repo;
pub mod postgres_employee_repo;
pub mod postgres_movement_repo;
pub mod postgres_period_repo;
pub mod postgres_tenant_repo;
pub mod postgres_time_entry_repo;
pub mod sqlite_audit_repo;
pub mod sqlite_base_pay_repo;
pub mod sqlite_concept_repo;
pub mod sqlite_employee_repo;
pub mod sqlite_movement_repo;
pub mod sqlite_period_repo;
pub mod sqlite_tenant_repo;
pub mod sqlite_time_entry_repo;
