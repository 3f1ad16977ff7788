use crate::domain::{models::base_pay::BasePayRecord, ports::BasePayRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteBasePayRepo {
    pool: SqlitePool,
}

impl SqliteBasePayRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BasePayRepository for SqliteBasePayRepo {
    async fn upsert(&self, record: &BasePayRecord) -> Result<BasePayRecord, AppError> {
        sqlx::query_as::<_, BasePayRecord>(
            "INSERT INTO base_pay_records (id, tenant_id, period_id, employee_id, amount, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(period_id, employee_id) DO UPDATE SET amount = excluded.amount
             RETURNING *"
        )
            .bind(&record.id).bind(&record.tenant_id).bind(&record.period_id).bind(&record.employee_id)
            .bind(record.amount).bind(record.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_period(&self, tenant_id: &str, period_id: &str) -> Result<Vec<BasePayRecord>, AppError> {
        sqlx::query_as::<_, BasePayRecord>(
            "SELECT * FROM base_pay_records WHERE tenant_id = ? AND period_id = ? ORDER BY employee_id ASC"
        )
            .bind(tenant_id).bind(period_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
