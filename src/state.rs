use std::sync::Arc;
use crate::domain::ports::{
    AuditLog, Authorizer, BasePayRepository, ConceptRepository, EmployeeRepository,
    MovementRepository, PayPeriodRepository, TabularReader, TenantRepository,
    TimeEntryRepository,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub tenant_repo: Arc<dyn TenantRepository>,
    pub employee_repo: Arc<dyn EmployeeRepository>,
    pub period_repo: Arc<dyn PayPeriodRepository>,
    pub concept_repo: Arc<dyn ConceptRepository>,
    pub movement_repo: Arc<dyn MovementRepository>,
    pub time_entry_repo: Arc<dyn TimeEntryRepository>,
    pub base_pay_repo: Arc<dyn BasePayRepository>,
    pub audit_log: Arc<dyn AuditLog>,
    pub tabular_reader: Arc<dyn TabularReader>,
    pub authorizer: Arc<dyn Authorizer>,
}
