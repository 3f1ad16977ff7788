mod common;

use axum::http::StatusCode;
use common::{parse_body, seed_tenant, TestApp};
use serde_json::{json, Value};

async fn seed_employee(app: &TestApp, tid: &str, first: &str, last: &str, phone: Option<&str>) -> String {
    let res = app.post(&format!("/api/v1/{}/employees", tid), "manager", json!({
        "first_name": first, "last_name": last, "phone_number": phone
    })).await;
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_employee_preview_matches_and_proposes() {
    let app = TestApp::new().await;
    let tid = seed_tenant(&app, "impco").await;
    let ana_id = seed_employee(&app, &tid, "Ana", "Ruiz", Some("555-010-2020")).await;

    // Same person with punctuated phone and shouty caps, plus one stranger.
    let csv = "First Name,Last Name,Phone\nANA,RUIZ,(555) 010-2020\nCarlos,Vega,555-111-2222\n";
    let res = app.post_csv(&format!("/api/v1/{}/import/employees/preview", tid), "manager", csv).await;
    assert_eq!(res.status(), StatusCode::OK);
    let previews = parse_body(res).await;
    let rows = previews.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    // Matched row with nothing new to write is excluded by default.
    assert_eq!(rows[0]["matched_employee_id"], ana_id.as_str());
    assert_eq!(rows[0]["change_set"]["changes"].as_array().unwrap().len(), 0);
    assert_eq!(rows[0]["include"], false);

    // Unmatched row becomes a create proposal.
    assert!(rows[1]["matched_employee_id"].is_null());
    assert_eq!(rows[1]["include"], true);
    assert!(rows[1]["change_set"]["employee_id"].is_null());
}

#[tokio::test]
async fn test_employee_import_apply_and_stability() {
    let app = TestApp::new().await;
    let tid = seed_tenant(&app, "impco2").await;
    let ana_id = seed_employee(&app, &tid, "Ana", "Ruiz", Some("555-010-2020")).await;

    let csv = "First Name,Last Name,Phone\nAna,Ruiz,555-999-0000\nCarlos,Vega,555-111-2222\n";
    let res = app.post_csv(&format!("/api/v1/{}/import/employees/preview", tid), "manager", csv).await;
    let previews = parse_body(res).await;

    // Supervisors may not commit imports.
    let res = app.post(&format!("/api/v1/{}/import/employees/apply", tid), "supervisor", json!({"rows": previews})).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.post(&format!("/api/v1/{}/import/employees/apply", tid), "manager", json!({"rows": previews})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let summary = parse_body(res).await;
    assert_eq!(summary["created"], 1);
    assert_eq!(summary["updated"], 1);
    assert_eq!(summary["failed"], 0);

    let res = app.get(&format!("/api/v1/{}/employees/{}", tid, ana_id), "manager").await;
    assert_eq!(parse_body(res).await["phone_number"], "555-999-0000");

    // Re-running the same file is a no-op: everything matches, nothing differs.
    let res = app.post_csv(&format!("/api/v1/{}/import/employees/preview", tid), "manager", csv).await;
    let previews: Value = parse_body(res).await;
    for row in previews.as_array().unwrap() {
        assert!(!row["matched_employee_id"].is_null());
        assert_eq!(row["include"], false);
    }
}

#[tokio::test]
async fn test_employee_preview_flags_unusable_rows() {
    let app = TestApp::new().await;
    let tid = seed_tenant(&app, "impco3").await;

    // Movement files must carry a concept column.
    let res = app.post_csv(&format!("/api/v1/{}/import/movements/preview", tid), "manager", "Employee,Total\nAna Ruiz,10\n").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Row with identifying data but no usable name for a create.
    let csv = "First Name,Last Name,Phone\n,,555-123-4567\n";
    let res = app.post_csv(&format!("/api/v1/{}/import/employees/preview", tid), "manager", csv).await;
    let previews = parse_body(res).await;
    let row = &previews.as_array().unwrap()[0];
    assert_eq!(row["include"], false);
    assert!(!row["error"].is_null());
}

#[tokio::test]
async fn test_movement_import_end_to_end() {
    let app = TestApp::new().await;
    let tid = seed_tenant(&app, "impco4").await;
    let ana_id = seed_employee(&app, &tid, "Ana", "Ruiz", None).await;

    let res = app.post(&format!("/api/v1/{}/concepts", tid), "manager", json!({
        "name": "Overtime", "category": "EXTRA", "calc_mode": "QUANTITY_X_RATE"
    })).await;
    parse_body(res).await;
    let res = app.post(&format!("/api/v1/{}/periods", tid), "manager", json!({"start_date": "2026-03-02"})).await;
    let period_id = parse_body(res).await["id"].as_str().unwrap().to_string();
    app.post(&format!("/api/v1/{}/periods/{}/open", tid, period_id), "manager", json!({})).await;

    // European decimal comma, name in reversed case, unknown concept row.
    let csv = "Employee,Concept,Quantity,Rate\nana ruiz,OVERTIME,5,\"12,50\"\nAna Ruiz,Mystery,1,10\n";
    let res = app.post_csv(&format!("/api/v1/{}/import/movements/preview", tid), "manager", csv).await;
    assert_eq!(res.status(), StatusCode::OK);
    let previews = parse_body(res).await;
    let rows = previews.as_array().unwrap();
    assert_eq!(rows[0]["employee_id"], ana_id.as_str());
    assert_eq!(rows[0]["total_value"], 62.50);
    assert_eq!(rows[0]["include"], true);
    assert_eq!(rows[1]["include"], false);
    assert!(rows[1]["error"].as_str().unwrap().contains("Mystery"));

    let res = app.post(&format!("/api/v1/{}/import/movements/apply", tid), "manager", json!({
        "period_id": period_id, "rows": previews
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let summary = parse_body(res).await;
    assert_eq!(summary["created"], 1);
    assert_eq!(summary["skipped"], 1);

    let res = app.get(&format!("/api/v1/{}/periods/{}/report", tid, period_id), "manager").await;
    let report = parse_body(res).await;
    assert_eq!(report["rows"][0]["extras"], 62.50);
}

#[tokio::test]
async fn test_movement_apply_against_locked_period() {
    let app = TestApp::new().await;
    let tid = seed_tenant(&app, "impco5").await;
    seed_employee(&app, &tid, "Ana", "Ruiz", None).await;

    let res = app.post(&format!("/api/v1/{}/concepts", tid), "manager", json!({
        "name": "Bonus", "category": "EXTRA", "calc_mode": "MANUAL_VALUE"
    })).await;
    parse_body(res).await;
    let res = app.post(&format!("/api/v1/{}/periods", tid), "manager", json!({"start_date": "2026-03-02"})).await;
    let period_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let csv = "Employee,Concept,Total\nAna Ruiz,Bonus,50\n";
    let res = app.post_csv(&format!("/api/v1/{}/import/movements/preview", tid), "manager", csv).await;
    let previews = parse_body(res).await;

    // The period was never opened: the guarded insert refuses every row.
    let res = app.post(&format!("/api/v1/{}/import/movements/apply", tid), "manager", json!({
        "period_id": period_id, "rows": previews
    })).await;
    assert_eq!(res.status(), StatusCode::LOCKED);
}
