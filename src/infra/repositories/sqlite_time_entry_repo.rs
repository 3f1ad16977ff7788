use crate::domain::models::period::STATUS_OPEN;
use crate::domain::models::time_entry::ENTRY_PENDING;
use crate::domain::{models::time_entry::TimeEntry, ports::TimeEntryRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteTimeEntryRepo {
    pool: SqlitePool,
}

impl SqliteTimeEntryRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimeEntryRepository for SqliteTimeEntryRepo {
    async fn create(&self, entry: &TimeEntry, period_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO time_entries (id, tenant_id, employee_id, clock_in, clock_out, break_minutes, status, created_at)
             SELECT ?, ?, ?, ?, ?, ?, ?, ?
             WHERE (SELECT status FROM pay_periods WHERE id = ?) = ?"
        )
            .bind(&entry.id).bind(&entry.tenant_id).bind(&entry.employee_id).bind(entry.clock_in)
            .bind(entry.clock_out).bind(entry.break_minutes).bind(&entry.status).bind(entry.created_at)
            .bind(period_id).bind(STATUS_OPEN)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<TimeEntry>, AppError> {
        sqlx::query_as::<_, TimeEntry>("SELECT * FROM time_entries WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_range(&self, tenant_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<TimeEntry>, AppError> {
        sqlx::query_as::<_, TimeEntry>(
            "SELECT * FROM time_entries WHERE tenant_id = ? AND clock_in >= ? AND clock_in < ? ORDER BY clock_in ASC"
        )
            .bind(tenant_id).bind(start).bind(end).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, entry: &TimeEntry, period_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE time_entries SET clock_in=?, clock_out=?, break_minutes=?, status=?
             WHERE id=? AND tenant_id=?
               AND (SELECT status FROM pay_periods WHERE id = ?) = ?"
        )
            .bind(entry.clock_in).bind(entry.clock_out).bind(entry.break_minutes).bind(&entry.status)
            .bind(&entry.id).bind(&entry.tenant_id).bind(period_id).bind(STATUS_OPEN)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
    async fn delete(&self, tenant_id: &str, id: &str, period_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM time_entries
             WHERE id = ? AND tenant_id = ?
               AND (SELECT status FROM pay_periods WHERE id = ?) = ?"
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
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "UPDATE time_entries SET status = ? WHERE tenant_id = ? AND status = ? AND id IN ({})",
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
