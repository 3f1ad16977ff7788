use crate::domain::{models::concept::Concept, ports::ConceptRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteConceptRepo {
    pool: SqlitePool,
}

impl SqliteConceptRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConceptRepository for SqliteConceptRepo {
    async fn create(&self, concept: &Concept) -> Result<Concept, AppError> {
        sqlx::query_as::<_, Concept>(
            "INSERT INTO concepts (id, tenant_id, name, category, calc_mode, default_rate, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&concept.id).bind(&concept.tenant_id).bind(&concept.name).bind(&concept.category)
            .bind(&concept.calc_mode).bind(concept.default_rate).bind(concept.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Concept>, AppError> {
        sqlx::query_as::<_, Concept>("SELECT * FROM concepts WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Concept>, AppError> {
        sqlx::query_as::<_, Concept>("SELECT * FROM concepts WHERE tenant_id = ? ORDER BY name ASC")
            .bind(tenant_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, concept: &Concept) -> Result<Concept, AppError> {
        sqlx::query_as::<_, Concept>(
            "UPDATE concepts SET name=?, category=?, calc_mode=?, default_rate=? WHERE id=? AND tenant_id=? RETURNING *"
        )
            .bind(&concept.name).bind(&concept.category).bind(&concept.calc_mode).bind(concept.default_rate)
            .bind(&concept.id).bind(&concept.tenant_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM concepts WHERE id = ? AND tenant_id = ?")
            .bind(id).bind(tenant_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Concept not found".into())); }
        Ok(())
    }
}
