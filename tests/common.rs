use payroll_backend::{
    api::router::create_router,
    config::Config,
    infra::authz::role_authorizer::RoleAuthorizer,
    infra::repositories::{
        sqlite_audit_repo::SqliteAuditRepo, sqlite_base_pay_repo::SqliteBasePayRepo,
        sqlite_concept_repo::SqliteConceptRepo, sqlite_employee_repo::SqliteEmployeeRepo,
        sqlite_movement_repo::SqliteMovementRepo, sqlite_period_repo::SqlitePeriodRepo,
        sqlite_tenant_repo::SqliteTenantRepo, sqlite_time_entry_repo::SqliteTimeEntryRepo,
    },
    infra::tabular::csv_reader::CsvReader,
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            audit_list_limit: 200,
        };

        let state = Arc::new(AppState {
            config,
            tenant_repo: Arc::new(SqliteTenantRepo::new(pool.clone())),
            employee_repo: Arc::new(SqliteEmployeeRepo::new(pool.clone())),
            period_repo: Arc::new(SqlitePeriodRepo::new(pool.clone())),
            concept_repo: Arc::new(SqliteConceptRepo::new(pool.clone())),
            movement_repo: Arc::new(SqliteMovementRepo::new(pool.clone())),
            time_entry_repo: Arc::new(SqliteTimeEntryRepo::new(pool.clone())),
            base_pay_repo: Arc::new(SqliteBasePayRepo::new(pool.clone())),
            audit_log: Arc::new(SqliteAuditRepo::new(pool.clone())),
            tabular_reader: Arc::new(CsvReader::new()),
            authorizer: Arc::new(RoleAuthorizer::new()),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn get(&self, uri: &str, role: &str) -> axum::response::Response {
        self.send("GET", uri, role, None).await
    }

    pub async fn post(&self, uri: &str, role: &str, body: Value) -> axum::response::Response {
        self.send("POST", uri, role, Some(body)).await
    }

    pub async fn put(&self, uri: &str, role: &str, body: Value) -> axum::response::Response {
        self.send("PUT", uri, role, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, role: &str) -> axum::response::Response {
        self.send("DELETE", uri, role, None).await
    }

    /// Raw-body POST for file uploads (CSV import previews).
    pub async fn post_csv(&self, uri: &str, role: &str, csv: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("X-User-Id", "user-1")
                    .header("X-Role", role)
                    .header(header::CONTENT_TYPE, "text/csv")
                    .body(Body::from(csv.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn send(&self, method: &str, uri: &str, role: &str, body: Option<Value>) -> axum::response::Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("X-User-Id", "user-1")
            .header("X-Role", role);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Creates a tenant and returns its id.
#[allow(dead_code)]
pub async fn seed_tenant(app: &TestApp, slug: &str) -> String {
    let res = app
        .post(
            "/api/v1/tenants",
            "admin",
            serde_json::json!({"name": format!("{} Inc", slug), "slug": slug}),
        )
        .await;
    assert!(res.status().is_success(), "tenant creation failed: {}", res.status());
    parse_body(res).await["id"].as_str().unwrap().to_string()
}
