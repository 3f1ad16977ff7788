use crate::domain::models::period::STATUS_OPEN;
use crate::domain::models::time_entry::ENTRY_PENDING;
use crate::domain::{models::time_entry::TimeEntry, ports::TimeEntryRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct PostgresTimeEntryRepo {
    pool: PgPool,
}

impl PostgresTimeEntryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimeEntryRepository for PostgresTimeEntryRepo {
    async fn create(&self, entry: &TimeEntry, period_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO time_entries (id, tenant_id, employee_id, clock_in, clock_out, break_minutes, status, created_at)
             SELECT $1, $2, $3, $4, $5, $6, $7, $8
             WHERE (SELECT status FROM pay_periods WHERE id = $9) = $10"
        )
            .bind(&entry.id).bind(&entry.tenant_id).bind(&entry.employee_id).bind(entry.clock_in)
            .bind(entry.clock_out).bind(entry.break_minutes).bind(&entry.status).bind(entry.created_at)
            .bind(period_id).bind(STATUS_OPEN)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<TimeEntry>, AppError> {
        sqlx::query_as::<_, TimeEntry>("SELECT * FROM time_entries WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_range(&self, tenant_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<TimeEntry>, AppError> {
        sqlx::query_as::<_, TimeEntry>(
            "SELECT * FROM time_entries WHERE tenant_id = $1 AND clock_in >= $2 AND clock_in < $3 ORDER BY clock_in ASC"
        )
            .bind(tenant_id).bind(start).bind(end).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, entry: &TimeEntry, period_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE time_entries SET clock_in=$1, clock_out=$2, break_minutes=$3, status=$4
             WHERE id=$5 AND tenant_id=$6
               AND (SELECT status FROM pay_periods WHERE id = $7) = $8"
        )
            .bind(entry.clock_in).bind(entry.clock_out).bind(entry.break_minutes).bind(&entry.status)
            .bind(&entry.id).bind(&entry.tenant_id).bind(period_id).bind(STATUS_OPEN)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
    async fn delete(&self, tenant_id: &str, id: &str, period_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM time_entries
             WHERE id = $1 AND tenant_id = $2
               AND (SELECT status FROM pay_periods WHERE id = $3) = $4"
        )
            .bind(id).bind(tenant_id).bind(period_id).bind(STATUS_OPEN)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
    async fn bulk_update_status(&self, tenant_id: &str, ids: &[String], new_status: &str) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }
        // One transaction per chunk; the PENDING condition makes a retried
        // chunk a no-op for rows that already transitioned.
        let placeholders = (0..ids.len())
            .map(|i| format!("${}", i + 4))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE time_entries SET status = $1 WHERE tenant_id = $2 AND status = $3 AND id IN ({})",
            placeholders
        );
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let mut query = sqlx::query(&sql).bind(new_status).bind(tenant_id).bind(ENTRY_PENDING);
        for id in ids {
            query = query.bind(id);
        }
        let result = query.execute(&mut *tx).await.map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
}
