mod common;

use axum::http::StatusCode;
use common::{parse_body, seed_tenant, TestApp};
use serde_json::json;

async fn seed(app: &TestApp) -> (String, String, String) {
    let tid = seed_tenant(app, "timeco").await;

    let res = app.post(&format!("/api/v1/{}/employees", tid), "manager", json!({
        "first_name": "Ana", "last_name": "Ruiz"
    })).await;
    let employee_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.post(&format!("/api/v1/{}/periods", tid), "manager", json!({"start_date": "2026-03-02"})).await;
    let period_id = parse_body(res).await["id"].as_str().unwrap().to_string();
    app.post(&format!("/api/v1/{}/periods/{}/open", tid, period_id), "manager", json!({})).await;

    (tid, employee_id, period_id)
}

#[tokio::test]
async fn test_entry_validation_and_report() {
    let app = TestApp::new().await;
    let (tid, employee_id, period_id) = seed(&app).await;

    // 09:00 -> 17:30 with a 30 minute break nets 480 minutes.
    let res = app.post(&format!("/api/v1/{}/time-entries", tid), "supervisor", json!({
        "employee_id": employee_id,
        "clock_in": "2026-03-03T09:00:00Z",
        "clock_out": "2026-03-03T17:30:00Z",
        "break_minutes": 30
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "PENDING");

    // Open entry on another day: counted, never paid.
    app.post(&format!("/api/v1/{}/time-entries", tid), "supervisor", json!({
        "employee_id": employee_id,
        "clock_in": "2026-03-04T09:00:00Z"
    })).await;

    let res = app.get(&format!("/api/v1/{}/periods/{}/time-report", tid, period_id), "supervisor").await;
    assert_eq!(res.status(), StatusCode::OK);
    let report = parse_body(res).await;
    let summary = &report["summaries"][0];
    assert_eq!(summary["total_minutes"], 480);
    assert_eq!(summary["total_break_minutes"], 30);
    assert_eq!(summary["open"], 1);
    assert_eq!(summary["has_issues"], true);
    assert_eq!(summary["days"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_entries_outside_periods_and_bad_spans_rejected() {
    let app = TestApp::new().await;
    let (tid, employee_id, _period_id) = seed(&app).await;

    // No period covers May.
    let res = app.post(&format!("/api/v1/{}/time-entries", tid), "supervisor", json!({
        "employee_id": employee_id,
        "clock_in": "2026-05-01T09:00:00Z",
        "clock_out": "2026-05-01T17:00:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.post(&format!("/api/v1/{}/time-entries", tid), "supervisor", json!({
        "employee_id": employee_id,
        "clock_in": "2026-03-03T17:00:00Z",
        "clock_out": "2026-03-03T09:00:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.post(&format!("/api/v1/{}/time-entries", tid), "supervisor", json!({
        "employee_id": employee_id,
        "clock_in": "2026-03-03T09:00:00Z",
        "break_minutes": -5
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_closed_period_locks_entries() {
    let app = TestApp::new().await;
    let (tid, employee_id, period_id) = seed(&app).await;

    let res = app.post(&format!("/api/v1/{}/time-entries", tid), "supervisor", json!({
        "employee_id": employee_id,
        "clock_in": "2026-03-03T09:00:00Z",
        "clock_out": "2026-03-03T17:00:00Z"
    })).await;
    let entry_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    app.post(&format!("/api/v1/{}/periods/{}/close", tid, period_id), "manager", json!({})).await;

    let res = app.post(&format!("/api/v1/{}/time-entries", tid), "supervisor", json!({
        "employee_id": employee_id,
        "clock_in": "2026-03-05T09:00:00Z",
        "clock_out": "2026-03-05T17:00:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::LOCKED);

    let res = app.put(&format!("/api/v1/{}/time-entries/{}", tid, entry_id), "supervisor", json!({
        "break_minutes": 15
    })).await;
    assert_eq!(res.status(), StatusCode::LOCKED);

    let res = app.delete(&format!("/api/v1/{}/time-entries/{}", tid, entry_id), "supervisor").await;
    assert_eq!(res.status(), StatusCode::LOCKED);
}

#[tokio::test]
async fn test_entry_cannot_escape_closed_period() {
    let app = TestApp::new().await;
    let (tid, employee_id, p1_id) = seed(&app).await;

    let res = app.post(&format!("/api/v1/{}/time-entries", tid), "supervisor", json!({
        "employee_id": employee_id,
        "clock_in": "2026-03-03T09:00:00Z",
        "clock_out": "2026-03-03T17:00:00Z"
    })).await;
    let entry_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    app.post(&format!("/api/v1/{}/periods/{}/close", tid, p1_id), "manager", json!({})).await;
    let res = app.post(&format!("/api/v1/{}/periods", tid), "manager", json!({"start_date": "2026-03-09"})).await;
    let p2_id = parse_body(res).await["id"].as_str().unwrap().to_string();
    app.post(&format!("/api/v1/{}/periods/{}/open", tid, p2_id), "manager", json!({})).await;

    // Moving clock_in into the open period must not unlock the edit.
    let res = app.put(&format!("/api/v1/{}/time-entries/{}", tid, entry_id), "supervisor", json!({
        "clock_in": "2026-03-10T09:00:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::LOCKED);

    // The entry stays where it was.
    let res = app.get(&format!("/api/v1/{}/periods/{}/time-entries", tid, p1_id), "supervisor").await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);
    let res = app.get(&format!("/api/v1/{}/periods/{}/time-entries", tid, p2_id), "supervisor").await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_single_status_change_requires_approval_capability() {
    let app = TestApp::new().await;
    let (tid, employee_id, _period_id) = seed(&app).await;

    let res = app.post(&format!("/api/v1/{}/time-entries", tid), "supervisor", json!({
        "employee_id": employee_id,
        "clock_in": "2026-03-03T09:00:00Z",
        "clock_out": "2026-03-03T17:00:00Z"
    })).await;
    let entry_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.put(&format!("/api/v1/{}/time-entries/{}", tid, entry_id), "member", json!({
        "status": "APPROVED"
    })).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Fields without approval semantics stay editable by anyone.
    let res = app.put(&format!("/api/v1/{}/time-entries/{}", tid, entry_id), "member", json!({
        "break_minutes": 15
    })).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.put(&format!("/api/v1/{}/time-entries/{}", tid, entry_id), "supervisor", json!({
        "status": "APPROVED"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "APPROVED");
}

#[tokio::test]
async fn test_bulk_status_locked_after_close() {
    let app = TestApp::new().await;
    let (tid, employee_id, period_id) = seed(&app).await;

    let res = app.post(&format!("/api/v1/{}/time-entries", tid), "supervisor", json!({
        "employee_id": employee_id,
        "clock_in": "2026-03-03T09:00:00Z",
        "clock_out": "2026-03-03T17:00:00Z"
    })).await;
    let entry_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    app.post(&format!("/api/v1/{}/periods/{}/close", tid, period_id), "manager", json!({})).await;

    let res = app.post(&format!("/api/v1/{}/time-entries/bulk-status", tid), "supervisor", json!({
        "ids": [entry_id.clone()], "status": "APPROVED"
    })).await;
    assert_eq!(res.status(), StatusCode::LOCKED);

    let res = app.get(&format!("/api/v1/{}/periods/{}/time-entries", tid, period_id), "supervisor").await;
    assert_eq!(parse_body(res).await[0]["status"], "PENDING");
}

#[tokio::test]
async fn test_bulk_status_moves_only_pending_entries() {
    let app = TestApp::new().await;
    let (tid, employee_id, _period_id) = seed(&app).await;

    let mut ids = Vec::new();
    for day in 2..5 {
        let res = app.post(&format!("/api/v1/{}/time-entries", tid), "supervisor", json!({
            "employee_id": employee_id,
            "clock_in": format!("2026-03-{:02}T09:00:00Z", day),
            "clock_out": format!("2026-03-{:02}T17:00:00Z", day)
        })).await;
        ids.push(parse_body(res).await["id"].as_str().unwrap().to_string());
    }

    // Members hold no approval capability.
    let res = app.post(&format!("/api/v1/{}/time-entries/bulk-status", tid), "member", json!({
        "ids": ids, "status": "APPROVED"
    })).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.post(&format!("/api/v1/{}/time-entries/bulk-status", tid), "supervisor", json!({
        "ids": ids, "status": "APPROVED"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["requested"], 3);
    assert_eq!(body["updated"], 3);

    // A retry finds nothing pending and is a clean no-op.
    let res = app.post(&format!("/api/v1/{}/time-entries/bulk-status", tid), "supervisor", json!({
        "ids": ids, "status": "APPROVED"
    })).await;
    assert_eq!(parse_body(res).await["updated"], 0);

    // Transitioning back to PENDING in bulk is not a thing.
    let res = app.post(&format!("/api/v1/{}/time-entries/bulk-status", tid), "supervisor", json!({
        "ids": ids, "status": "PENDING"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
