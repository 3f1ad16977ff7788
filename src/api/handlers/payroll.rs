use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{RollupQuery, SetBasePayRequest};
use crate::api::dtos::responses::{ExportResponse, PayrollReportResponse};
use crate::api::extractors::{auth::AuthUser, tenant::TenantId};
use crate::domain::models::base_pay::BasePayRecord;
use crate::domain::models::period::STATUS_PAID;
use crate::domain::services::money;
use crate::domain::services::rollup::{apply_filter, compute_rollup, compute_totals, RollupFilter, RollupRow};
use crate::error::AppError;
use crate::state::AppState;

async fn rollup_rows(
    state: &AppState,
    tenant_id: &str,
    period_id: &str,
    filter: RollupFilter,
) -> Result<Vec<RollupRow>, AppError> {
    state
        .period_repo
        .find_by_id(tenant_id, period_id)
        .await?
        .ok_or(AppError::NotFound("Period not found".into()))?;

    let employees = state.employee_repo.list_by_tenant(tenant_id).await?;
    let base_pay = state.base_pay_repo.list_by_period(tenant_id, period_id).await?;
    let movements = state.movement_repo.list_by_period(tenant_id, period_id).await?;
    let concepts = state.concept_repo.list_by_tenant(tenant_id).await?;

    let rows = compute_rollup(&employees, &base_pay, &movements, &concepts);
    Ok(apply_filter(rows, filter))
}

pub async fn payroll_report(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
    Path((_, period_id)): Path<(String, String)>,
    Query(query): Query<RollupQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = RollupFilter {
        extras_only: query.extras_only,
        zero_base_only: query.zero_base_only,
    };
    let rows = rollup_rows(&state, &tenant_id, &period_id, filter).await?;
    let totals = compute_totals(&rows);
    Ok(Json(PayrollReportResponse { period_id, rows, totals }))
}

pub async fn payroll_export(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
    Path((_, period_id)): Path<(String, String)>,
    Query(query): Query<RollupQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = RollupFilter {
        extras_only: query.extras_only,
        zero_base_only: query.zero_base_only,
    };
    let rows = rollup_rows(&state, &tenant_id, &period_id, filter).await?;

    let data = rows
        .into_iter()
        .map(|r| {
            vec![
                serde_json::json!(r.employee_name),
                serde_json::json!(r.base_pay),
                serde_json::json!(r.extras),
                serde_json::json!(r.deductions),
                serde_json::json!(r.final_pay),
                serde_json::json!(r.movement_count),
            ]
        })
        .collect();

    Ok(Json(ExportResponse {
        headers: vec!["Employee", "Base Pay", "Extras", "Deductions", "Final Pay", "Movements"],
        rows: data,
    }))
}

pub async fn set_base_pay(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
    Path((_, period_id)): Path<(String, String)>,
    Json(payload): Json<SetBasePayRequest>,
) -> Result<impl IntoResponse, AppError> {
    let period = state
        .period_repo
        .find_by_id(&tenant_id, &period_id)
        .await?
        .ok_or(AppError::NotFound("Period not found".into()))?;
    if period.status == STATUS_PAID {
        return Err(AppError::PeriodLocked("Paid periods accept no base-pay changes".into()));
    }
    state
        .employee_repo
        .find_by_id(&tenant_id, &payload.employee_id)
        .await?
        .ok_or(AppError::NotFound("Employee not found".into()))?;

    if payload.amount < 0.0 {
        return Err(AppError::Validation("amount must not be negative".into()));
    }
    let amount = money::round_money(payload.amount)?;

    let record = BasePayRecord::new(tenant_id, period.id, payload.employee_id, amount);
    let saved = state.base_pay_repo.upsert(&record).await?;
    info!("Base pay for {} in period {} set to {}", saved.employee_id, saved.period_id, saved.amount);
    Ok(Json(saved))
}
