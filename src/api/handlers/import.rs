use axum::{body::Bytes, extract::{Query, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{ApplyEmployeeImportRequest, ApplyMovementImportRequest, EmployeeImportQuery};
use crate::api::dtos::responses::ImportSummaryResponse;
use crate::api::extractors::{auth::AuthUser, tenant::TenantId};
use crate::api::handlers::record_audit;
use crate::domain::models::audit::NewAuditEventParams;
use crate::domain::models::employee::{Employee, NewEmployeeParams};
use crate::domain::models::movement::{Movement, NewMovementParams};
use crate::domain::ports::Capability;
use crate::domain::services::change_set::{
    apply_changes, FIELD_EXTERNAL_ID, FIELD_FIRST_NAME, FIELD_LAST_NAME, FIELD_MANAGER_NAME,
    FIELD_PHONE_NUMBER, FIELD_RECOMMENDER_NAME,
};
use crate::domain::services::reconciliation::{preview_employee_rows, preview_movement_rows};
use crate::error::AppError;
use crate::state::AppState;

pub async fn preview_employees(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
    Query(query): Query<EmployeeImportQuery>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let table = state.tabular_reader.parse(&body)?;
    let candidates = state.employee_repo.list_by_tenant(&tenant_id).await?;
    let previews = preview_employee_rows(&table, query.policy, &candidates)?;
    Ok(Json(previews))
}

pub async fn apply_employees(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    user: AuthUser,
    Json(payload): Json<ApplyEmployeeImportRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require(&state, Capability::ApplyImport)?;

    let mut summary = ImportSummaryResponse::default();
    for row in &payload.rows {
        if !row.include || row.error.is_some() || row.change_set.is_empty() {
            summary.skipped += 1;
            continue;
        }

        let outcome = match &row.change_set.employee_id {
            None => {
                let (Some(first), Some(last)) = (
                    row.change_set.value_of(FIELD_FIRST_NAME),
                    row.change_set.value_of(FIELD_LAST_NAME),
                ) else {
                    summary.failed += 1;
                    summary.errors.push(format!("row {}: create is missing a name", row.row_number));
                    continue;
                };
                let employee = Employee::new(NewEmployeeParams {
                    tenant_id: tenant_id.clone(),
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    phone_number: row.change_set.value_of(FIELD_PHONE_NUMBER).map(str::to_string),
                    external_id: row.change_set.value_of(FIELD_EXTERNAL_ID).map(str::to_string),
                    manager_name: row.change_set.value_of(FIELD_MANAGER_NAME).map(str::to_string),
                    recommender_name: row.change_set.value_of(FIELD_RECOMMENDER_NAME).map(str::to_string),
                });
                state.employee_repo.create(&employee).await.map(|_| &mut summary.created)
            }
            Some(employee_id) => {
                match state.employee_repo.find_by_id(&tenant_id, employee_id).await {
                    // The target vanished between preview and apply: skip,
                    // never silently create a duplicate.
                    Ok(None) => {
                        summary.skipped += 1;
                        summary.errors.push(format!("row {}: employee no longer exists", row.row_number));
                        continue;
                    }
                    Ok(Some(mut employee)) => {
                        apply_changes(&mut employee, &row.change_set.changes);
                        state.employee_repo.update(&employee).await.map(|_| &mut summary.updated)
                    }
                    Err(e) => Err(e),
                }
            }
        };

        match outcome {
            Ok(counter) => *counter += 1,
            Err(e) => {
                summary.failed += 1;
                summary.errors.push(format!("row {}: {}", row.row_number, e));
            }
        }
    }

    info!(
        "Employee import applied: {} created, {} updated, {} skipped, {} failed",
        summary.created, summary.updated, summary.skipped, summary.failed
    );
    record_audit(&state, NewAuditEventParams {
        tenant_id,
        actor_id: user.id,
        action: "import.employees".to_string(),
        entity_type: "employee".to_string(),
        entity_id: format!("rows:{}", payload.rows.len()),
        before_state: None,
        after_state: serde_json::to_value(&summary).ok(),
    }).await;

    Ok(Json(summary))
}

pub async fn preview_movements(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let table = state.tabular_reader.parse(&body)?;
    let candidates = state.employee_repo.list_by_tenant(&tenant_id).await?;
    let concepts = state.concept_repo.list_by_tenant(&tenant_id).await?;
    let previews = preview_movement_rows(&table, &candidates, &concepts)?;
    Ok(Json(previews))
}

pub async fn apply_movements(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    user: AuthUser,
    Json(payload): Json<ApplyMovementImportRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require(&state, Capability::ApplyImport)?;

    state
        .period_repo
        .find_by_id(&tenant_id, &payload.period_id)
        .await?
        .ok_or(AppError::NotFound("Period not found".into()))?;

    let mut summary = ImportSummaryResponse::default();
    for row in &payload.rows {
        if !row.include || row.error.is_some() {
            summary.skipped += 1;
            continue;
        }
        let (Some(employee_id), Some(concept_id), Some(total_value)) =
            (&row.employee_id, &row.concept_id, row.total_value)
        else {
            summary.failed += 1;
            summary.errors.push(format!("row {}: incomplete preview row", row.row_number));
            continue;
        };

        match state.employee_repo.find_by_id(&tenant_id, employee_id).await? {
            None => {
                summary.skipped += 1;
                summary.errors.push(format!("row {}: employee no longer exists", row.row_number));
                continue;
            }
            Some(_) => {}
        }

        let movement = Movement::new(NewMovementParams {
            tenant_id: tenant_id.clone(),
            period_id: payload.period_id.clone(),
            employee_id: employee_id.clone(),
            concept_id: concept_id.clone(),
            quantity: row.quantity,
            rate: row.rate,
            total_value,
        });
        match state.movement_repo.create(&movement).await {
            // A locked period blocks every remaining row identically.
            Ok(false) => return Err(AppError::PeriodLocked("Period is not open for changes".into())),
            Ok(true) => summary.created += 1,
            Err(e) => {
                summary.failed += 1;
                summary.errors.push(format!("row {}: {}", row.row_number, e));
            }
        }
    }

    info!(
        "Movement import applied: {} created, {} skipped, {} failed",
        summary.created, summary.skipped, summary.failed
    );
    record_audit(&state, NewAuditEventParams {
        tenant_id,
        actor_id: user.id,
        action: "import.movements".to_string(),
        entity_type: "movement".to_string(),
        entity_id: payload.period_id.clone(),
        before_state: None,
        after_state: serde_json::to_value(&summary).ok(),
    }).await;

    Ok(Json(summary))
}
