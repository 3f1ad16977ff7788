use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::{DateTime, Duration, NaiveTime, Utc};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{BulkEntryStatusRequest, CreateTimeEntryRequest, UpdateTimeEntryRequest};
use crate::api::dtos::responses::{BulkEntryStatusResponse, TimeReportResponse};
use crate::api::extractors::{auth::AuthUser, tenant::TenantId};
use crate::api::handlers::record_audit;
use crate::domain::models::audit::NewAuditEventParams;
use crate::domain::models::period::{PayPeriod, PeriodStatus};
use crate::domain::models::time_entry::{TimeEntry, TimeEntryStatus};
use crate::domain::ports::Capability;
use crate::domain::services::time_aggregator::{aggregate, BULK_BATCH_SIZE};
use crate::error::AppError;
use crate::state::AppState;

fn period_range(period: &PayPeriod) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = period.start_date.and_time(NaiveTime::MIN).and_utc();
    let end = (period.end_date + Duration::days(1)).and_time(NaiveTime::MIN).and_utc();
    (start, end)
}

/// The period a clock-in belongs to. Entries outside any period are refused;
/// there is nowhere for their minutes to land.
async fn covering_period(
    state: &AppState,
    tenant_id: &str,
    clock_in: DateTime<Utc>,
) -> Result<PayPeriod, AppError> {
    state
        .period_repo
        .find_covering(tenant_id, clock_in.date_naive())
        .await?
        .ok_or_else(|| AppError::Validation("No pay period covers this clock-in date".into()))
}

fn validate_span(entry: &TimeEntry) -> Result<(), AppError> {
    if entry.break_minutes < 0 {
        return Err(AppError::Validation("break_minutes must not be negative".into()));
    }
    if let Some(out) = entry.clock_out {
        if out <= entry.clock_in {
            return Err(AppError::Validation("clock_out must be after clock_in".into()));
        }
    }
    Ok(())
}

pub async fn create_time_entry(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
    Json(payload): Json<CreateTimeEntryRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .employee_repo
        .find_by_id(&tenant_id, &payload.employee_id)
        .await?
        .ok_or(AppError::NotFound("Employee not found".into()))?;

    let entry = TimeEntry::new(
        tenant_id.clone(),
        payload.employee_id,
        payload.clock_in,
        payload.clock_out,
        payload.break_minutes.unwrap_or(0),
    );
    validate_span(&entry)?;

    let period = covering_period(&state, &tenant_id, entry.clock_in).await?;
    if !state.time_entry_repo.create(&entry, &period.id).await? {
        return Err(AppError::PeriodLocked("Period is not open for changes".into()));
    }
    Ok(Json(entry))
}

pub async fn update_time_entry(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    user: AuthUser,
    Path((_, entry_id)): Path<(String, String)>,
    Json(payload): Json<UpdateTimeEntryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut entry = state
        .time_entry_repo
        .find_by_id(&tenant_id, &entry_id)
        .await?
        .ok_or(AppError::NotFound("Time entry not found".into()))?;

    // The lock is governed by the period the entry currently sits in, so a
    // closed period's hours cannot be edited by moving clock_in elsewhere.
    let current = covering_period(&state, &tenant_id, entry.clock_in).await?;
    if current.status_enum() != Some(PeriodStatus::Open) {
        return Err(AppError::PeriodLocked("Period is not open for changes".into()));
    }

    if payload.status.is_some() {
        user.require(&state, Capability::ApproveTimeEntries)?;
    }

    if let Some(v) = payload.clock_in { entry.clock_in = v; }
    if let Some(v) = payload.clock_out { entry.clock_out = Some(v); }
    if let Some(v) = payload.break_minutes { entry.break_minutes = v; }
    if let Some(v) = payload.status {
        let parsed = TimeEntryStatus::parse(&v)
            .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", v)))?;
        entry.status = parsed.as_str().to_string();
    }
    validate_span(&entry)?;

    // A moved entry must also land in an open period; the guarded update
    // re-checks the destination at write time.
    let destination = covering_period(&state, &tenant_id, entry.clock_in).await?;
    if !state.time_entry_repo.update(&entry, &destination.id).await? {
        return Err(AppError::PeriodLocked("Period is not open for changes".into()));
    }
    Ok(Json(entry))
}

pub async fn delete_time_entry(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
    Path((_, entry_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let entry = state
        .time_entry_repo
        .find_by_id(&tenant_id, &entry_id)
        .await?
        .ok_or(AppError::NotFound("Time entry not found".into()))?;

    let period = covering_period(&state, &tenant_id, entry.clock_in).await?;
    if !state.time_entry_repo.delete(&tenant_id, &entry_id, &period.id).await? {
        return Err(AppError::PeriodLocked("Period is not open for changes".into()));
    }
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn list_time_entries(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
    Path((_, period_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let period = state
        .period_repo
        .find_by_id(&tenant_id, &period_id)
        .await?
        .ok_or(AppError::NotFound("Period not found".into()))?;
    let (start, end) = period_range(&period);
    let entries = state.time_entry_repo.list_by_range(&tenant_id, start, end).await?;
    Ok(Json(entries))
}

pub async fn time_report(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
    Path((_, period_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let period = state
        .period_repo
        .find_by_id(&tenant_id, &period_id)
        .await?
        .ok_or(AppError::NotFound("Period not found".into()))?;
    let (start, end) = period_range(&period);
    let entries = state.time_entry_repo.list_by_range(&tenant_id, start, end).await?;
    Ok(Json(TimeReportResponse {
        period_id: period.id,
        summaries: aggregate(&entries),
    }))
}

pub async fn bulk_entry_status(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    user: AuthUser,
    Json(payload): Json<BulkEntryStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require(&state, Capability::ApproveTimeEntries)?;

    let status = TimeEntryStatus::parse(&payload.status)
        .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", payload.status)))?;
    if status == TimeEntryStatus::Pending {
        return Err(AppError::Validation("Bulk transition back to PENDING is not supported".into()));
    }

    // Closed periods lock status changes too; entries already gone are left
    // for the conditioned update to skip.
    for id in &payload.ids {
        let Some(entry) = state.time_entry_repo.find_by_id(&tenant_id, id).await? else {
            continue;
        };
        let period = covering_period(&state, &tenant_id, entry.clock_in).await?;
        if period.status_enum() != Some(PeriodStatus::Open) {
            return Err(AppError::PeriodLocked("Period is not open for changes".into()));
        }
    }

    let mut updated: u64 = 0;
    for (batch, chunk) in payload.ids.chunks(BULK_BATCH_SIZE).enumerate() {
        updated += state
            .time_entry_repo
            .bulk_update_status(&tenant_id, chunk, status.as_str())
            .await
            .map_err(|e| AppError::PartialBatch { batch, reason: e.to_string() })?;
    }
    info!("Bulk status {}: {} of {} entries updated", status.as_str(), updated, payload.ids.len());

    record_audit(&state, NewAuditEventParams {
        tenant_id,
        actor_id: user.id,
        action: "time_entry.bulk_status".to_string(),
        entity_type: "time_entry".to_string(),
        entity_id: format!("batch:{}", payload.ids.len()),
        before_state: None,
        after_state: Some(serde_json::json!({
            "status": status.as_str(),
            "requested": payload.ids.len(),
            "updated": updated,
        })),
    }).await;

    Ok(Json(BulkEntryStatusResponse {
        requested: payload.ids.len(),
        updated,
    }))
}
