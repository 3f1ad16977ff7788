use crate::domain::{models::base_pay::BasePayRecord, ports::BasePayRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresBasePayRepo {
    pool: PgPool,
}

impl PostgresBasePayRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BasePayRepository for PostgresBasePayRepo {
    async fn upsert(&self, record: &BasePayRecord) -> Result<BasePayRecord, AppError> {
        sqlx::query_as::<_, BasePayRecord>(
            "INSERT INTO base_pay_records (id, tenant_id, period_id, employee_id, amount, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT(period_id, employee_id) DO UPDATE SET amount = excluded.amount
             RETURNING *"
        )
            .bind(&record.id).bind(&record.tenant_id).bind(&record.period_id).bind(&record.employee_id)
            .bind(record.amount).bind(record.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_period(&self, tenant_id: &str, period_id: &str) -> Result<Vec<BasePayRecord>, AppError> {
        sqlx::query_as::<_, BasePayRecord>(
            "SELECT * FROM base_pay_records WHERE tenant_id = $1 AND period_id = $2 ORDER BY employee_id ASC"
        )
            .bind(tenant_id).bind(period_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
