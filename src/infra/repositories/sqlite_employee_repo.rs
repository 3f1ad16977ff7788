use crate::domain::{models::employee::Employee, ports::EmployeeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteEmployeeRepo {
    pool: SqlitePool,
}

impl SqliteEmployeeRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for SqliteEmployeeRepo {
    async fn create(&self, employee: &Employee) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>(
            "INSERT INTO employees (id, tenant_id, first_name, last_name, phone_number, external_id, manager_name, recommender_name, is_active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&employee.id).bind(&employee.tenant_id).bind(&employee.first_name).bind(&employee.last_name)
            .bind(&employee.phone_number).bind(&employee.external_id).bind(&employee.manager_name)
            .bind(&employee.recommender_name).bind(employee.is_active).bind(employee.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Employee>, AppError> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Employee>, AppError> {
        sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE tenant_id = ? AND is_active = 1 ORDER BY created_at ASC, id ASC"
        )
            .bind(tenant_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, employee: &Employee) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>(
            "UPDATE employees SET first_name=?, last_name=?, phone_number=?, external_id=?, manager_name=?, recommender_name=?, is_active=?
             WHERE id=? AND tenant_id=?
             RETURNING *"
        )
            .bind(&employee.first_name).bind(&employee.last_name).bind(&employee.phone_number)
            .bind(&employee.external_id).bind(&employee.manager_name).bind(&employee.recommender_name)
            .bind(employee.is_active).bind(&employee.id).bind(&employee.tenant_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn deactivate(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE employees SET is_active = 0 WHERE id = ? AND tenant_id = ?")
            .bind(id).bind(tenant_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Employee not found".into())); }
        Ok(())
    }
}
