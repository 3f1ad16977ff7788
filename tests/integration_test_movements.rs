mod common;

use axum::http::StatusCode;
use common::{parse_body, seed_tenant, TestApp};
use serde_json::json;

struct Fixture {
    tid: String,
    period_id: String,
    employee_id: String,
    overtime_id: String,
    bonus_id: String,
}

async fn seed(app: &TestApp) -> Fixture {
    let tid = seed_tenant(app, "moveco").await;

    let res = app.post(&format!("/api/v1/{}/employees", tid), "manager", json!({
        "first_name": "Ana", "last_name": "Ruiz"
    })).await;
    let employee_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.post(&format!("/api/v1/{}/concepts", tid), "manager", json!({
        "name": "Overtime", "category": "EXTRA", "calc_mode": "QUANTITY_X_RATE"
    })).await;
    let overtime_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.post(&format!("/api/v1/{}/concepts", tid), "manager", json!({
        "name": "Bonus", "category": "EXTRA", "calc_mode": "MANUAL_VALUE"
    })).await;
    let bonus_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.post(&format!("/api/v1/{}/periods", tid), "manager", json!({"start_date": "2026-03-02"})).await;
    let period_id = parse_body(res).await["id"].as_str().unwrap().to_string();
    app.post(&format!("/api/v1/{}/periods/{}/open", tid, period_id), "manager", json!({})).await;

    Fixture { tid, period_id, employee_id, overtime_id, bonus_id }
}

#[tokio::test]
async fn test_quantity_times_rate_rounding() {
    let app = TestApp::new().await;
    let f = seed(&app).await;

    let res = app.post(&format!("/api/v1/{}/periods/{}/movements", f.tid, f.period_id), "manager", json!({
        "employee_id": f.employee_id, "concept_id": f.overtime_id, "quantity": 5.0, "rate": 12.50
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let movement = parse_body(res).await;
    assert_eq!(movement["total_value"], 62.50);

    // Half-up at the second decimal: 2.5 * 1.01 = 2.525 -> 2.53.
    let res = app.post(&format!("/api/v1/{}/periods/{}/movements", f.tid, f.period_id), "manager", json!({
        "employee_id": f.employee_id, "concept_id": f.overtime_id, "quantity": 2.5, "rate": 1.01
    })).await;
    assert_eq!(parse_body(res).await["total_value"], 2.53);
}

#[tokio::test]
async fn test_zero_and_incomplete_movements_rejected() {
    let app = TestApp::new().await;
    let f = seed(&app).await;

    let res = app.post(&format!("/api/v1/{}/periods/{}/movements", f.tid, f.period_id), "manager", json!({
        "employee_id": f.employee_id, "concept_id": f.bonus_id, "total_value": 0.0
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Quantity-based concept with no rate anywhere.
    let res = app.post(&format!("/api/v1/{}/periods/{}/movements", f.tid, f.period_id), "manager", json!({
        "employee_id": f.employee_id, "concept_id": f.overtime_id, "quantity": 2.0
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.post(&format!("/api/v1/{}/periods/{}/movements", f.tid, f.period_id), "manager", json!({
        "employee_id": f.employee_id, "concept_id": "no-such-concept", "total_value": 10.0
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_default_rate_fallback() {
    let app = TestApp::new().await;
    let f = seed(&app).await;

    let res = app.post(&format!("/api/v1/{}/concepts", f.tid), "manager", json!({
        "name": "Night shift", "category": "EXTRA", "calc_mode": "QUANTITY_X_RATE", "default_rate": 8.0
    })).await;
    let night_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.post(&format!("/api/v1/{}/periods/{}/movements", f.tid, f.period_id), "manager", json!({
        "employee_id": f.employee_id, "concept_id": night_id, "quantity": 3.0
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["total_value"], 24.0);
}

#[tokio::test]
async fn test_closed_period_locks_movements() {
    let app = TestApp::new().await;
    let f = seed(&app).await;

    let res = app.post(&format!("/api/v1/{}/periods/{}/movements", f.tid, f.period_id), "manager", json!({
        "employee_id": f.employee_id, "concept_id": f.bonus_id, "total_value": 40.0
    })).await;
    let movement_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    app.post(&format!("/api/v1/{}/periods/{}/close", f.tid, f.period_id), "manager", json!({})).await;

    let res = app.post(&format!("/api/v1/{}/periods/{}/movements", f.tid, f.period_id), "manager", json!({
        "employee_id": f.employee_id, "concept_id": f.bonus_id, "total_value": 15.0
    })).await;
    assert_eq!(res.status(), StatusCode::LOCKED);

    let res = app.put(&format!("/api/v1/{}/movements/{}", f.tid, movement_id), "manager", json!({
        "total_value": 45.0
    })).await;
    assert_eq!(res.status(), StatusCode::LOCKED);

    let res = app.delete(&format!("/api/v1/{}/movements/{}", f.tid, movement_id), "manager").await;
    assert_eq!(res.status(), StatusCode::LOCKED);

    // Existing rows stay readable after the lock.
    let res = app.get(&format!("/api/v1/{}/periods/{}/movements", f.tid, f.period_id), "manager").await;
    let listed = parse_body(res).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}
