use crate::domain::{models::audit::AuditEvent, ports::AuditLog};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresAuditRepo {
    pool: PgPool,
}

impl PostgresAuditRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLog for PostgresAuditRepo {
    async fn record(&self, event: &AuditEvent) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO audit_events (id, tenant_id, actor_id, action, entity_type, entity_id, before_state, after_state, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        )
            .bind(&event.id).bind(&event.tenant_id).bind(&event.actor_id).bind(&event.action)
            .bind(&event.entity_type).bind(&event.entity_id).bind(&event.before_state)
            .bind(&event.after_state).bind(event.created_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
    async fn list_by_tenant(&self, tenant_id: &str, limit: i64) -> Result<Vec<AuditEvent>, AppError> {
        sqlx::query_as::<_, AuditEvent>(
            "SELECT * FROM audit_events WHERE tenant_id = $1 ORDER BY created_at DESC LIMIT $2"
        )
            .bind(tenant_id).bind(limit).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
