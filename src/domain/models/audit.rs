use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Structured record of a state-changing operation, appended to an
/// append-only log. `before_state`/`after_state` hold JSON snapshots.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AuditEvent {
    pub id: String,
    pub tenant_id: String,
    pub actor_id: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub before_state: Option<String>,
    pub after_state: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewAuditEventParams {
    pub tenant_id: String,
    pub actor_id: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub before_state: Option<serde_json::Value>,
    pub after_state: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(params: NewAuditEventParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: params.tenant_id,
            actor_id: params.actor_id,
            action: params.action,
            entity_type: params.entity_type,
            entity_id: params.entity_id,
            before_state: params.before_state.map(|v| v.to_string()),
            after_state: params.after_state.map(|v| v.to_string()),
            created_at: Utc::now(),
        }
    }
}
