use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateEmployeeRequest, UpdateEmployeeRequest};
use crate::api::extractors::{auth::AuthUser, tenant::TenantId};
use crate::api::handlers::record_audit;
use crate::domain::models::audit::NewAuditEventParams;
use crate::domain::models::employee::{Employee, NewEmployeeParams};
use crate::domain::ports::Capability;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    user: AuthUser,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require(&state, Capability::ManageEmployees)?;

    if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
        return Err(AppError::Validation("first_name and last_name are required".into()));
    }

    let employee = Employee::new(NewEmployeeParams {
        tenant_id: tenant_id.clone(),
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone_number: payload.phone_number,
        external_id: payload.external_id,
        manager_name: payload.manager_name,
        recommender_name: payload.recommender_name,
    });
    let created = state.employee_repo.create(&employee).await?;
    info!("Created employee {} ({})", created.full_name(), created.id);

    record_audit(&state, NewAuditEventParams {
        tenant_id,
        actor_id: user.id,
        action: "employee.create".to_string(),
        entity_type: "employee".to_string(),
        entity_id: created.id.clone(),
        before_state: None,
        after_state: serde_json::to_value(&created).ok(),
    }).await;

    Ok(Json(created))
}

pub async fn list_employees(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let employees = state.employee_repo.list_by_tenant(&tenant_id).await?;
    Ok(Json(employees))
}

pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
    Path((_, employee_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let employee = state
        .employee_repo
        .find_by_id(&tenant_id, &employee_id)
        .await?
        .ok_or(AppError::NotFound("Employee not found".into()))?;
    Ok(Json(employee))
}

pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    user: AuthUser,
    Path((_, employee_id)): Path<(String, String)>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require(&state, Capability::ManageEmployees)?;

    let mut employee = state
        .employee_repo
        .find_by_id(&tenant_id, &employee_id)
        .await?
        .ok_or(AppError::NotFound("Employee not found".into()))?;
    let before = serde_json::to_value(&employee).ok();

    if let Some(v) = payload.first_name { employee.first_name = v; }
    if let Some(v) = payload.last_name { employee.last_name = v; }
    if let Some(v) = payload.phone_number { employee.phone_number = Some(v); }
    if let Some(v) = payload.external_id { employee.external_id = Some(v); }
    if let Some(v) = payload.manager_name { employee.manager_name = Some(v); }
    if let Some(v) = payload.recommender_name { employee.recommender_name = Some(v); }

    let updated = state.employee_repo.update(&employee).await?;

    record_audit(&state, NewAuditEventParams {
        tenant_id,
        actor_id: user.id,
        action: "employee.update".to_string(),
        entity_type: "employee".to_string(),
        entity_id: updated.id.clone(),
        before_state: before,
        after_state: serde_json::to_value(&updated).ok(),
    }).await;

    Ok(Json(updated))
}

pub async fn deactivate_employee(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    user: AuthUser,
    Path((_, employee_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    user.require(&state, Capability::ManageEmployees)?;

    state.employee_repo.deactivate(&tenant_id, &employee_id).await?;
    info!("Deactivated employee {}", employee_id);

    record_audit(&state, NewAuditEventParams {
        tenant_id,
        actor_id: user.id,
        action: "employee.deactivate".to_string(),
        entity_type: "employee".to_string(),
        entity_id: employee_id,
        before_state: None,
        after_state: None,
    }).await;

    Ok(Json(serde_json::json!({"status": "deactivated"})))
}
