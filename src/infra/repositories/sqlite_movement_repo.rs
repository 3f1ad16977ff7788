use crate::domain::models::period::STATUS_OPEN;
use crate::domain::{models::movement::Movement, ports::MovementRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteMovementRepo {
    pool: SqlitePool,
}

impl SqliteMovementRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovementRepository for SqliteMovementRepo {
    async fn create(&self, movement: &Movement) -> Result<bool, AppError> {
        // Guarded insert: the period status is re-checked in the same
        // statement, because the period may have closed since the caller
        // last read it.
        let result = sqlx::query(
            "INSERT INTO movements (id, tenant_id, period_id, employee_id, concept_id, quantity, rate, total_value, created_at)
             SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?
             WHERE (SELECT status FROM pay_periods WHERE id = ?) = ?"
        )
            .bind(&movement.id).bind(&movement.tenant_id).bind(&movement.period_id).bind(&movement.employee_id)
            .bind(&movement.concept_id).bind(movement.quantity).bind(movement.rate).bind(movement.total_value)
            .bind(movement.created_at).bind(&movement.period_id).bind(STATUS_OPEN)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Movement>, AppError> {
        sqlx::query_as::<_, Movement>("SELECT * FROM movements WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_period(&self, tenant_id: &str, period_id: &str) -> Result<Vec<Movement>, AppError> {
        sqlx::query_as::<_, Movement>(
            "SELECT * FROM movements WHERE tenant_id = ? AND period_id = ? ORDER BY created_at ASC, id ASC"
        )
            .bind(tenant_id).bind(period_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, movement: &Movement) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE movements SET concept_id=?, quantity=?, rate=?, total_value=?
             WHERE id=? AND tenant_id=?
               AND (SELECT status FROM pay_periods WHERE id = movements.period_id) = ?"
        )
            .bind(&movement.concept_id).bind(movement.quantity).bind(movement.rate).bind(movement.total_value)
            .bind(&movement.id).bind(&movement.tenant_id).bind(STATUS_OPEN)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM movements
             WHERE id = ? AND tenant_id = ?
               AND (SELECT status FROM pay_periods WHERE id = movements.period_id) = ?"
        )
            .bind(id).bind(tenant_id).bind(STATUS_OPEN)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
