use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CreatePeriodRequest;
use crate::api::extractors::{auth::AuthUser, tenant::TenantId};
use crate::api::handlers::record_audit;
use crate::domain::models::audit::NewAuditEventParams;
use crate::domain::models::period::PayPeriod;
use crate::domain::ports::Capability;
use crate::domain::services::period_lifecycle::{
    validate_transition, Denial, PeriodAction, PredecessorState, Transition,
};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_period(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    user: AuthUser,
    Json(payload): Json<CreatePeriodRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require(&state, Capability::OpenPeriod)?;

    let end_date = payload.start_date + Duration::days(6);
    let overlapping = state
        .period_repo
        .count_overlapping(&tenant_id, payload.start_date, end_date)
        .await?;
    if overlapping > 0 {
        return Err(AppError::Conflict("Period overlaps an existing one".into()));
    }

    let period = PayPeriod::new(tenant_id.clone(), payload.start_date);
    let created = state.period_repo.create(&period).await?;
    info!("Created period {} ({} - {})", created.id, created.start_date, created.end_date);

    record_audit(&state, NewAuditEventParams {
        tenant_id,
        actor_id: user.id,
        action: "period.create".to_string(),
        entity_type: "period".to_string(),
        entity_id: created.id.clone(),
        before_state: None,
        after_state: serde_json::to_value(&created).ok(),
    }).await;

    Ok(Json(created))
}

pub async fn list_periods(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let periods = state.period_repo.list_by_tenant(&tenant_id).await?;
    Ok(Json(periods))
}

pub async fn get_period(
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
    Ok(Json(period))
}

pub async fn close_period(
    state: State<Arc<AppState>>,
    tenant: TenantId,
    user: AuthUser,
    path: Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    transition(state, tenant, user, path, PeriodAction::Close, Capability::ClosePeriod).await
}

pub async fn open_period(
    state: State<Arc<AppState>>,
    tenant: TenantId,
    user: AuthUser,
    path: Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    transition(state, tenant, user, path, PeriodAction::Open, Capability::OpenPeriod).await
}

pub async fn reopen_period(
    state: State<Arc<AppState>>,
    tenant: TenantId,
    user: AuthUser,
    path: Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    transition(state, tenant, user, path, PeriodAction::Reopen, Capability::ReopenOutOfSequence).await
}

pub async fn publish_period(
    state: State<Arc<AppState>>,
    tenant: TenantId,
    user: AuthUser,
    path: Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    transition(state, tenant, user, path, PeriodAction::Publish, Capability::PublishPeriod).await
}

pub async fn unpublish_period(
    state: State<Arc<AppState>>,
    tenant: TenantId,
    user: AuthUser,
    path: Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    transition(state, tenant, user, path, PeriodAction::Unpublish, Capability::PublishPeriod).await
}

pub async fn pay_period(
    state: State<Arc<AppState>>,
    tenant: TenantId,
    user: AuthUser,
    path: Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    transition(state, tenant, user, path, PeriodAction::MarkPaid, Capability::MarkPeriodPaid).await
}

fn action_name(action: PeriodAction) -> &'static str {
    match action {
        PeriodAction::Close => "period.close",
        PeriodAction::Open => "period.open",
        PeriodAction::Reopen => "period.reopen",
        PeriodAction::Publish => "period.publish",
        PeriodAction::Unpublish => "period.unpublish",
        PeriodAction::MarkPaid => "period.pay",
    }
}

async fn transition(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    user: AuthUser,
    Path((_, period_id)): Path<(String, String)>,
    action: PeriodAction,
    capability: Capability,
) -> Result<Json<PayPeriod>, AppError> {
    user.require(&state, capability)?;

    let period = state
        .period_repo
        .find_by_id(&tenant_id, &period_id)
        .await?
        .ok_or(AppError::NotFound("Period not found".into()))?;
    let current = period.status_enum().ok_or(AppError::Internal)?;

    let predecessor = match state
        .period_repo
        .find_predecessor(&tenant_id, period.start_date)
        .await?
    {
        None => PredecessorState::Absent,
        Some(p) if p.has_been_closed() => PredecessorState::Closed,
        Some(_) => PredecessorState::NotClosed,
    };

    let another_open = state
        .period_repo
        .find_open(&tenant_id)
        .await?
        .is_some_and(|p| p.id != period.id);

    let outcome = validate_transition(current, action, predecessor, another_open)
        .map_err(|denial| match denial {
            Denial::WrongState { .. } => AppError::Conflict(denial.reason()),
            Denial::AnotherPeriodOpen | Denial::OutOfSequence => {
                AppError::SequenceViolation(denial.reason())
            }
        })?;

    if outcome == Transition::Noop {
        return Ok(Json(period));
    }

    let now = Utc::now();
    let applied = match action {
        PeriodAction::Close => state.period_repo.close(&tenant_id, &period.id, now).await?,
        PeriodAction::Open | PeriodAction::Reopen => {
            state.period_repo.open(&tenant_id, &period.id).await?
        }
        PeriodAction::Publish => state.period_repo.publish(&tenant_id, &period.id, now).await?,
        PeriodAction::Unpublish => state.period_repo.unpublish(&tenant_id, &period.id).await?,
        PeriodAction::MarkPaid => state.period_repo.mark_paid(&tenant_id, &period.id, now).await?,
    };
    if !applied {
        // The guarded update lost a race: state moved between read and write.
        return Err(AppError::Conflict("Period state changed concurrently".into()));
    }

    let updated = state
        .period_repo
        .find_by_id(&tenant_id, &period.id)
        .await?
        .ok_or(AppError::Internal)?;
    info!("Period {} {} -> {}", updated.id, period.status, updated.status);

    record_audit(&state, NewAuditEventParams {
        tenant_id,
        actor_id: user.id,
        action: action_name(action).to_string(),
        entity_type: "period".to_string(),
        entity_id: updated.id.clone(),
        before_state: serde_json::to_value(&period).ok(),
        after_state: serde_json::to_value(&updated).ok(),
    }).await;

    Ok(Json(updated))
}
