use crate::domain::{models::employee::Employee, ports::EmployeeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresEmployeeRepo {
    pool: PgPool,
}

impl PostgresEmployeeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepo {
    async fn create(&self, employee: &Employee) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>(
            "INSERT INTO employees (id, tenant_id, first_name, last_name, phone_number, external_id, manager_name, recommender_name, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *"
        )
            .bind(&employee.id).bind(&employee.tenant_id).bind(&employee.first_name).bind(&employee.last_name)
            .bind(&employee.phone_number).bind(&employee.external_id).bind(&employee.manager_name)
            .bind(&employee.recommender_name).bind(employee.is_active).bind(employee.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Employee>, AppError> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Employee>, AppError> {
        sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE tenant_id = $1 AND is_active = TRUE ORDER BY created_at ASC, id ASC"
        )
            .bind(tenant_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, employee: &Employee) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>(
            "UPDATE employees SET first_name=$1, last_name=$2, phone_number=$3, external_id=$4, manager_name=$5, recommender_name=$6, is_active=$7
             WHERE id=$8 AND tenant_id=$9
             RETURNING *"
        )
            .bind(&employee.first_name).bind(&employee.last_name).bind(&employee.phone_number)
            .bind(&employee.external_id).bind(&employee.manager_name).bind(&employee.recommender_name)
            .bind(employee.is_active).bind(&employee.id).bind(&employee.tenant_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn deactivate(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE employees SET is_active = FALSE WHERE id = $1 AND tenant_id = $2")
            .bind(id).bind(tenant_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Employee not found".into())); }
        Ok(())
    }
}
