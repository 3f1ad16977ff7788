use crate::domain::models::period::{PayPeriod, STATUS_CLOSED, STATUS_OPEN, STATUS_PAID, STATUS_PUBLISHED};
use crate::domain::ports::PayPeriodRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Row, SqlitePool};

pub struct SqlitePeriodRepo {
    pool: SqlitePool,
}

impl SqlitePeriodRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PayPeriodRepository for SqlitePeriodRepo {
    async fn create(&self, period: &PayPeriod) -> Result<PayPeriod, AppError> {
        sqlx::query_as::<_, PayPeriod>(
            "INSERT INTO pay_periods (id, tenant_id, start_date, end_date, status, closed_at, published_at, paid_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&period.id).bind(&period.tenant_id).bind(period.start_date).bind(period.end_date)
            .bind(&period.status).bind(period.closed_at).bind(period.published_at).bind(period.paid_at)
            .bind(period.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<PayPeriod>, AppError> {
        sqlx::query_as::<_, PayPeriod>("SELECT * FROM pay_periods WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<PayPeriod>, AppError> {
        sqlx::query_as::<_, PayPeriod>("SELECT * FROM pay_periods WHERE tenant_id = ? ORDER BY start_date ASC")
            .bind(tenant_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn count_overlapping(&self, tenant_id: &str, start: NaiveDate, end: NaiveDate) -> Result<i64, AppError> {
        let result = sqlx::query(
            "SELECT COUNT(*) as count FROM pay_periods WHERE tenant_id = ? AND start_date <= ? AND end_date >= ?"
        )
            .bind(tenant_id).bind(end).bind(start)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }
    async fn find_predecessor(&self, tenant_id: &str, start: NaiveDate) -> Result<Option<PayPeriod>, AppError> {
        sqlx::query_as::<_, PayPeriod>(
            "SELECT * FROM pay_periods WHERE tenant_id = ? AND start_date < ? ORDER BY start_date DESC LIMIT 1"
        )
            .bind(tenant_id).bind(start).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_open(&self, tenant_id: &str) -> Result<Option<PayPeriod>, AppError> {
        sqlx::query_as::<_, PayPeriod>("SELECT * FROM pay_periods WHERE tenant_id = ? AND status = ? LIMIT 1")
            .bind(tenant_id).bind(STATUS_OPEN).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_covering(&self, tenant_id: &str, date: NaiveDate) -> Result<Option<PayPeriod>, AppError> {
        sqlx::query_as::<_, PayPeriod>(
            "SELECT * FROM pay_periods WHERE tenant_id = ? AND start_date <= ? AND end_date >= ?"
        )
            .bind(tenant_id).bind(date).bind(date).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn close(&self, tenant_id: &str, id: &str, at: DateTime<Utc>) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE pay_periods SET status = ?, closed_at = ? WHERE id = ? AND tenant_id = ? AND status = ?"
        )
            .bind(STATUS_CLOSED).bind(at).bind(id).bind(tenant_id).bind(STATUS_OPEN)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
    async fn open(&self, tenant_id: &str, id: &str) -> Result<bool, AppError> {
        // Single guarded statement: the transition and the single-open rule
        // are checked atomically, so two concurrent opens cannot both win.
        let result = sqlx::query(
            "UPDATE pay_periods SET status = ?
             WHERE id = ? AND tenant_id = ? AND status = ?
               AND NOT EXISTS (SELECT 1 FROM pay_periods WHERE tenant_id = ? AND status = ?)"
        )
            .bind(STATUS_OPEN).bind(id).bind(tenant_id).bind(STATUS_CLOSED).bind(tenant_id).bind(STATUS_OPEN)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
    async fn publish(&self, tenant_id: &str, id: &str, at: DateTime<Utc>) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE pay_periods SET status = ?, published_at = ? WHERE id = ? AND tenant_id = ? AND status = ?"
        )
            .bind(STATUS_PUBLISHED).bind(at).bind(id).bind(tenant_id).bind(STATUS_CLOSED)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
    async fn unpublish(&self, tenant_id: &str, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE pay_periods SET status = ?, published_at = NULL WHERE id = ? AND tenant_id = ? AND status = ?"
        )
            .bind(STATUS_CLOSED).bind(id).bind(tenant_id).bind(STATUS_PUBLISHED)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
    async fn mark_paid(&self, tenant_id: &str, id: &str, at: DateTime<Utc>) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE pay_periods SET status = ?, paid_at = ? WHERE id = ? AND tenant_id = ? AND status IN (?, ?)"
        )
            .bind(STATUS_PAID).bind(at).bind(id).bind(tenant_id).bind(STATUS_CLOSED).bind(STATUS_PUBLISHED)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
