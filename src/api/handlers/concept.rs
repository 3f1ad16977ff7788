use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateConceptRequest, UpdateConceptRequest};
use crate::api::extractors::{auth::AuthUser, tenant::TenantId};
use crate::domain::models::concept::{CalcMode, Concept, ConceptCategory};
use crate::domain::ports::Capability;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_concept(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    user: AuthUser,
    Json(payload): Json<CreateConceptRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require(&state, Capability::ManageEmployees)?;

    let category = ConceptCategory::parse(&payload.category)
        .ok_or_else(|| AppError::Validation(format!("Unknown category '{}'", payload.category)))?;
    let calc_mode = CalcMode::parse(&payload.calc_mode)
        .ok_or_else(|| AppError::Validation(format!("Unknown calc_mode '{}'", payload.calc_mode)))?;
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }

    let concept = Concept::new(tenant_id, payload.name, category, calc_mode, payload.default_rate);
    let created = state.concept_repo.create(&concept).await?;
    info!("Created concept {} ({})", created.name, created.id);
    Ok(Json(created))
}

pub async fn list_concepts(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let concepts = state.concept_repo.list_by_tenant(&tenant_id).await?;
    Ok(Json(concepts))
}

pub async fn update_concept(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    user: AuthUser,
    Path((_, concept_id)): Path<(String, String)>,
    Json(payload): Json<UpdateConceptRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require(&state, Capability::ManageEmployees)?;

    let mut concept = state
        .concept_repo
        .find_by_id(&tenant_id, &concept_id)
        .await?
        .ok_or(AppError::NotFound("Concept not found".into()))?;

    if let Some(v) = payload.name { concept.name = v; }
    if let Some(v) = payload.category {
        let parsed = ConceptCategory::parse(&v)
            .ok_or_else(|| AppError::Validation(format!("Unknown category '{}'", v)))?;
        concept.category = parsed.as_str().to_string();
    }
    if let Some(v) = payload.calc_mode {
        let parsed = CalcMode::parse(&v)
            .ok_or_else(|| AppError::Validation(format!("Unknown calc_mode '{}'", v)))?;
        concept.calc_mode = parsed.as_str().to_string();
    }
    if let Some(v) = payload.default_rate { concept.default_rate = Some(v); }

    let updated = state.concept_repo.update(&concept).await?;
    Ok(Json(updated))
}

pub async fn delete_concept(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    user: AuthUser,
    Path((_, concept_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    user.require(&state, Capability::ManageEmployees)?;

    state.concept_repo.delete(&tenant_id, &concept_id).await?;
    info!("Deleted concept {}", concept_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
