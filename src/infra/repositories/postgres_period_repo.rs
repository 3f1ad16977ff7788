use crate::domain::models::period::{PayPeriod, STATUS_CLOSED, STATUS_OPEN, STATUS_PAID, STATUS_PUBLISHED};
use crate::domain::ports::PayPeriodRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Row};

pub struct PostgresPeriodRepo {
    pool: PgPool,
}

impl PostgresPeriodRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PayPeriodRepository for PostgresPeriodRepo {
    async fn create(&self, period: &PayPeriod) -> Result<PayPeriod, AppError> {
        sqlx::query_as::<_, PayPeriod>(
            "INSERT INTO pay_periods (id, tenant_id, start_date, end_date, status, closed_at, published_at, paid_at, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *"
        )
            .bind(&period.id).bind(&period.tenant_id).bind(period.start_date).bind(period.end_date)
            .bind(&period.status).bind(period.closed_at).bind(period.published_at).bind(period.paid_at)
            .bind(period.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<PayPeriod>, AppError> {
        sqlx::query_as::<_, PayPeriod>("SELECT * FROM pay_periods WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<PayPeriod>, AppError> {
        sqlx::query_as::<_, PayPeriod>("SELECT * FROM pay_periods WHERE tenant_id = $1 ORDER BY start_date ASC")
            .bind(tenant_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn count_overlapping(&self, tenant_id: &str, start: NaiveDate, end: NaiveDate) -> Result<i64, AppError> {
        let result = sqlx::query(
            "SELECT COUNT(*) as count FROM pay_periods WHERE tenant_id = $1 AND start_date <= $2 AND end_date >= $3"
        )
            .bind(tenant_id).bind(end).bind(start)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }
    async fn find_predecessor(&self, tenant_id: &str, start: NaiveDate) -> Result<Option<PayPeriod>, AppError> {
        sqlx::query_as::<_, PayPeriod>(
            "SELECT * FROM pay_periods WHERE tenant_id = $1 AND start_date < $2 ORDER BY start_date DESC LIMIT 1"
        )
            .bind(tenant_id).bind(start).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_open(&self, tenant_id: &str) -> Result<Option<PayPeriod>, AppError> {
        sqlx::query_as::<_, PayPeriod>("SELECT * FROM pay_periods WHERE tenant_id = $1 AND status = $2 LIMIT 1")
            .bind(tenant_id).bind(STATUS_OPEN).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_covering(&self, tenant_id: &str, date: NaiveDate) -> Result<Option<PayPeriod>, AppError> {
        sqlx::query_as::<_, PayPeriod>(
            "SELECT * FROM pay_periods WHERE tenant_id = $1 AND start_date <= $2 AND end_date >= $3"
        )
            .bind(tenant_id).bind(date).bind(date).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn close(&self, tenant_id: &str, id: &str, at: DateTime<Utc>) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE pay_periods SET status = $1, closed_at = $2 WHERE id = $3 AND tenant_id = $4 AND status = $5"
        )
            .bind(STATUS_CLOSED).bind(at).bind(id).bind(tenant_id).bind(STATUS_OPEN)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
    async fn open(&self, tenant_id: &str, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE pay_periods SET status = $1
             WHERE id = $2 AND tenant_id = $3 AND status = $4
               AND NOT EXISTS (SELECT 1 FROM pay_periods p WHERE p.tenant_id = $3 AND p.status = $1)"
        )
            .bind(STATUS_OPEN).bind(id).bind(tenant_id).bind(STATUS_CLOSED)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
    async fn publish(&self, tenant_id: &str, id: &str, at: DateTime<Utc>) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE pay_periods SET status = $1, published_at = $2 WHERE id = $3 AND tenant_id = $4 AND status = $5"
        )
            .bind(STATUS_PUBLISHED).bind(at).bind(id).bind(tenant_id).bind(STATUS_CLOSED)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
    async fn unpublish(&self, tenant_id: &str, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE pay_periods SET status = $1, published_at = NULL WHERE id = $2 AND tenant_id = $3 AND status = $4"
        )
            .bind(STATUS_CLOSED).bind(id).bind(tenant_id).bind(STATUS_PUBLISHED)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
    async fn mark_paid(&self, tenant_id: &str, id: &str, at: DateTime<Utc>) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE pay_periods SET status = $1, paid_at = $2 WHERE id = $3 AND tenant_id = $4 AND status IN ($5, $6)"
        )
            .bind(STATUS_PAID).bind(at).bind(id).bind(tenant_id).bind(STATUS_CLOSED).bind(STATUS_PUBLISHED)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
