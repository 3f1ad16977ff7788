use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{audit, concept, employee, health, import, movement, payroll, period, tenant, time_entry};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Tenants
        .route("/api/v1/tenants", post(tenant::create_tenant))
        .route("/api/v1/tenants/by-slug/{slug}", get(tenant::get_tenant_by_slug))
        .route("/api/v1/{tenant_id}/tenant", get(tenant::get_tenant))

        // Employees
        .route("/api/v1/{tenant_id}/employees", post(employee::create_employee).get(employee::list_employees))
        .route("/api/v1/{tenant_id}/employees/{employee_id}", get(employee::get_employee).put(employee::update_employee).delete(employee::deactivate_employee))

        // Concepts
        .route("/api/v1/{tenant_id}/concepts", post(concept::create_concept).get(concept::list_concepts))
        .route("/api/v1/{tenant_id}/concepts/{concept_id}", put(concept::update_concept).delete(concept::delete_concept))

        // Periods & lifecycle
        .route("/api/v1/{tenant_id}/periods", post(period::create_period).get(period::list_periods))
        .route("/api/v1/{tenant_id}/periods/{period_id}", get(period::get_period))
        .route("/api/v1/{tenant_id}/periods/{period_id}/close", post(period::close_period))
        .route("/api/v1/{tenant_id}/periods/{period_id}/open", post(period::open_period))
        .route("/api/v1/{tenant_id}/periods/{period_id}/reopen", post(period::reopen_period))
        .route("/api/v1/{tenant_id}/periods/{period_id}/publish", post(period::publish_period))
        .route("/api/v1/{tenant_id}/periods/{period_id}/unpublish", post(period::unpublish_period))
        .route("/api/v1/{tenant_id}/periods/{period_id}/pay", post(period::pay_period))

        // Movements
        .route("/api/v1/{tenant_id}/periods/{period_id}/movements", post(movement::create_movement).get(movement::list_movements))
        .route("/api/v1/{tenant_id}/movements/{movement_id}", put(movement::update_movement).delete(movement::delete_movement))

        // Time tracking
        .route("/api/v1/{tenant_id}/time-entries", post(time_entry::create_time_entry))
        .route("/api/v1/{tenant_id}/time-entries/{entry_id}", put(time_entry::update_time_entry).delete(time_entry::delete_time_entry))
        .route("/api/v1/{tenant_id}/time-entries/bulk-status", post(time_entry::bulk_entry_status))
        .route("/api/v1/{tenant_id}/periods/{period_id}/time-entries", get(time_entry::list_time_entries))
        .route("/api/v1/{tenant_id}/periods/{period_id}/time-report", get(time_entry::time_report))

        // Payroll rollup
        .route("/api/v1/{tenant_id}/periods/{period_id}/report", get(payroll::payroll_report))
        .route("/api/v1/{tenant_id}/periods/{period_id}/export", get(payroll::payroll_export))
        .route("/api/v1/{tenant_id}/periods/{period_id}/base-pay", post(payroll::set_base_pay))

        // Bulk import
        .route("/api/v1/{tenant_id}/import/employees/preview", post(import::preview_employees))
        .route("/api/v1/{tenant_id}/import/employees/apply", post(import::apply_employees))
        .route("/api/v1/{tenant_id}/import/movements/preview", post(import::preview_movements))
        .route("/api/v1/{tenant_id}/import/movements/apply", post(import::apply_movements))

        // Audit trail
        .route("/api/v1/{tenant_id}/audit", get(audit::list_audit_events))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        tenant_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
