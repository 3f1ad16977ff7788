use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateMovementRequest, UpdateMovementRequest};
use crate::api::extractors::{auth::AuthUser, tenant::TenantId};
use crate::domain::models::concept::{CalcMode, Concept};
use crate::domain::models::movement::{Movement, NewMovementParams};
use crate::domain::services::money;
use crate::error::AppError;
use crate::state::AppState;

/// Compute the stored total from the concept's calculation mode. A missing
/// rate falls back to the concept's default; a zero result is rejected so no
/// no-op movement ever reaches storage.
fn compute_total(
    concept: &Concept,
    quantity: Option<f64>,
    rate: Option<f64>,
    total_value: Option<f64>,
) -> Result<f64, AppError> {
    let total = match CalcMode::parse(&concept.calc_mode) {
        Some(CalcMode::QuantityXRate) => {
            let q = quantity.ok_or_else(|| AppError::Validation("quantity is required".into()))?;
            let r = rate
                .or(concept.default_rate)
                .ok_or_else(|| AppError::Validation("rate is required and the concept has no default".into()))?;
            money::quantity_times_rate(q, r)?
        }
        _ => {
            let v = total_value.ok_or_else(|| AppError::Validation("total_value is required".into()))?;
            money::round_money(v)?
        }
    };
    if total == 0.0 {
        return Err(AppError::Validation("Movement computes to a zero total".into()));
    }
    Ok(total)
}

pub async fn create_movement(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
    Path((_, period_id)): Path<(String, String)>,
    Json(payload): Json<CreateMovementRequest>,
) -> Result<impl IntoResponse, AppError> {
    let period = state
        .period_repo
        .find_by_id(&tenant_id, &period_id)
        .await?
        .ok_or(AppError::NotFound("Period not found".into()))?;
    state
        .employee_repo
        .find_by_id(&tenant_id, &payload.employee_id)
        .await?
        .ok_or(AppError::NotFound("Employee not found".into()))?;
    let concept = state
        .concept_repo
        .find_by_id(&tenant_id, &payload.concept_id)
        .await?
        .ok_or(AppError::NotFound("Concept not found".into()))?;

    let total = compute_total(&concept, payload.quantity, payload.rate, payload.total_value)?;

    let movement = Movement::new(NewMovementParams {
        tenant_id: tenant_id.clone(),
        period_id: period.id.clone(),
        employee_id: payload.employee_id,
        concept_id: payload.concept_id,
        quantity: payload.quantity,
        rate: payload.rate,
        total_value: total,
    });

    if !state.movement_repo.create(&movement).await? {
        return Err(AppError::PeriodLocked("Period is not open for changes".into()));
    }
    info!("Created movement {} ({} = {})", movement.id, concept.name, total);
    Ok(Json(movement))
}

pub async fn list_movements(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
    Path((_, period_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let movements = state.movement_repo.list_by_period(&tenant_id, &period_id).await?;
    Ok(Json(movements))
}

pub async fn update_movement(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
    Path((_, movement_id)): Path<(String, String)>,
    Json(payload): Json<UpdateMovementRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut movement = state
        .movement_repo
        .find_by_id(&tenant_id, &movement_id)
        .await?
        .ok_or(AppError::NotFound("Movement not found".into()))?;

    if let Some(concept_id) = payload.concept_id {
        movement.concept_id = concept_id;
    }
    let concept = state
        .concept_repo
        .find_by_id(&tenant_id, &movement.concept_id)
        .await?
        .ok_or(AppError::NotFound("Concept not found".into()))?;

    movement.quantity = payload.quantity.or(movement.quantity);
    movement.rate = payload.rate.or(movement.rate);
    let manual_value = payload.total_value.or(Some(movement.total_value));
    movement.total_value = compute_total(&concept, movement.quantity, movement.rate, manual_value)?;

    if !state.movement_repo.update(&movement).await? {
        return Err(AppError::PeriodLocked("Period is not open for changes".into()));
    }
    Ok(Json(movement))
}

pub async fn delete_movement(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
    Path((_, movement_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state
        .movement_repo
        .find_by_id(&tenant_id, &movement_id)
        .await?
        .ok_or(AppError::NotFound("Movement not found".into()))?;

    if !state.movement_repo.delete(&tenant_id, &movement_id).await? {
        return Err(AppError::PeriodLocked("Period is not open for changes".into()));
    }
    info!("Deleted movement {}", movement_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
