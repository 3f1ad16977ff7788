use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::extractors::{auth::AuthUser, tenant::TenantId};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_audit_events(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let events = state
        .audit_log
        .list_by_tenant(&tenant_id, state.config.audit_list_limit)
        .await?;
    Ok(Json(events))
}
