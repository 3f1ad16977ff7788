pub mod audit;
pub mod concept;
pub mod employee;
pub mod health;
pub mod import;
pub mod movement;
pub mod payroll;
pub mod period;
pub mod tenant;
pub mod time_entry;

use tracing::warn;

use crate::domain::models::audit::{AuditEvent, NewAuditEventParams};
use crate::state::AppState;

/// Audit writes are best-effort: a failed append is logged, never surfaced
/// to the caller, and never rolls back the operation it describes.
pub(crate) async fn record_audit(state: &AppState, params: NewAuditEventParams) {
    let event = AuditEvent::new(params);
    if let Err(e) = state.audit_log.record(&event).await {
        warn!(
            action = %event.action,
            entity_id = %event.entity_id,
            "failed to append audit event: {}",
            e
        );
    }
}
